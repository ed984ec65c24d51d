use leptos::prelude::*;
use log::warn;
use wasm_bindgen_futures::spawn_local;

use crate::components::concept_graph::ConceptGraphCanvas;
use crate::components::concept_graph::data::about_me_graph;
use crate::components::detail_overlay::{DetailOverlay, OverlayState};
use crate::config::SiteConfig;
use crate::content::ContentClient;

/// The About-Me concept graph with its detail overlay. Needs no props.
///
/// Reads `SiteConfig` and `ContentClient` from context, falling back to the
/// defaults when mounted outside `App`.
#[component]
pub fn AboutGraph() -> impl IntoView {
	let config = use_context::<SiteConfig>().unwrap_or_else(|| {
		warn!("AboutGraph mounted without SiteConfig; using defaults");
		SiteConfig::default()
	});
	let client = use_context::<ContentClient>()
		.unwrap_or_else(|| ContentClient::new(&config.api_base));

	let graph = about_me_graph(config.direction);
	let overlay = RwSignal::new(OverlayState::default());

	let selected = Signal::derive(move || overlay.with(|s| s.open_node().map(str::to_string)));
	let labels = graph.clone();
	let title = Signal::derive(move || {
		overlay.with(|s| {
			s.open_node()
				.and_then(|id| labels.node(id))
				.map(|node| node.label.clone())
		})
	});

	let on_select = Callback::new(move |node_id: String| {
		let mut ticket = None;
		overlay.update(|s| ticket = s.toggle(&node_id));
		let Some(ticket) = ticket else {
			return;
		};
		let client = client.clone();
		spawn_local(async move {
			let result = client.node_paragraphs(&ticket.node_id).await;
			overlay.update(|s| {
				s.resolve(&ticket, result);
			});
		});
	});

	let data = Signal::derive(move || graph.clone());

	view! {
		<div class="about-graph">
			<ConceptGraphCanvas
				data=data
				direction=config.direction
				selected=selected
				on_select=on_select
			/>
			<DetailOverlay state=overlay title=title />
		</div>
	}
}
