use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::components::project_card::ProjectCard;
use crate::config::SiteConfig;
use crate::content::{ContentClient, ContentError, Project};

#[derive(Clone, Debug, PartialEq)]
enum Listing {
	Loading,
	Failed(String),
	Ready(Vec<Project>),
}

impl Listing {
	fn from_result(result: Result<Vec<Project>, ContentError>) -> Self {
		match result {
			Ok(projects) => {
				info!("loaded {} projects", projects.len());
				Self::Ready(projects)
			}
			Err(e) => {
				warn!("could not load projects: {e}");
				Self::Failed(e.to_string())
			}
		}
	}
}

/// Project cards fetched once from the content store.
#[component]
pub fn Projects() -> impl IntoView {
	let client = use_context::<ContentClient>().unwrap_or_else(|| {
		let config = use_context::<SiteConfig>().unwrap_or_default();
		ContentClient::new(&config.api_base)
	});
	let listing = RwSignal::new(Listing::Loading);

	spawn_local(async move {
		let result = client.projects().await;
		// The page may be gone by the time the store answers.
		let _ = listing.try_set(Listing::from_result(result));
	});

	let body = move || match listing.get() {
		Listing::Loading => view! { <div class="status">"Loading projects..."</div> }.into_any(),
		Listing::Failed(reason) => {
			view! { <div class="status">"Error loading projects: " {reason}</div> }.into_any()
		}
		Listing::Ready(projects) if projects.is_empty() => {
			view! { <div class="status">"No projects found"</div> }.into_any()
		}
		Listing::Ready(projects) => view! {
			<div class="container">
				<div class="grid-container">
					{projects
						.into_iter()
						.map(|project| view! { <ProjectCard project=project /> })
						.collect_view()}
				</div>
			</div>
		}
		.into_any(),
	};

	view! {
		<div class="projects">
			<h1 class="title">"Projects"</h1>
			<h2 class="self-introduction">
				"I am someone that loves to code and create things. I am a software engineer and I have \
				 worked on a variety of projects and I am always looking for new challenges. I am \
				 passionate about technology."
			</h2>
			{body}
		</div>
	}
}
