use leptos::prelude::*;

use crate::components::about_graph::AboutGraph;
use crate::components::effects::{Starfield, Strip};
use crate::config::SiteConfig;

/// Landing page: the concept graph over a starry background.
#[component]
pub fn About() -> impl IntoView {
	let config = use_context::<SiteConfig>().unwrap_or_default();

	view! {
		<div class="about">
			<Starfield count=config.star_count />
			<Strip restart_delay=config.strip_restart_delay />
			<div class="flow">
				<AboutGraph />
			</div>
		</div>
	}
}
