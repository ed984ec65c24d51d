use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::config::SiteConfig;
use crate::content::{ContentClient, Paragraph};

const UNTITLED: &str = "(no node)";

/// Consecutive paragraphs grouped under their node title, store order kept.
fn group_by_title(paragraphs: Vec<Paragraph>) -> Vec<(String, Vec<Paragraph>)> {
	let mut groups: Vec<(String, Vec<Paragraph>)> = Vec::new();
	for paragraph in paragraphs {
		let title = paragraph.node_title.clone().unwrap_or_else(|| UNTITLED.to_string());
		match groups.last_mut() {
			Some((last, members)) if *last == title => members.push(paragraph),
			Some(_) | None => groups.push((title, vec![paragraph])),
		}
	}
	groups
}

/// Every stored paragraph with its node title, for checking the content store.
#[component]
pub fn Paragraphs() -> impl IntoView {
	let client = use_context::<ContentClient>().unwrap_or_else(|| {
		let config = use_context::<SiteConfig>().unwrap_or_default();
		ContentClient::new(&config.api_base)
	});
	let listing = RwSignal::new(None::<Result<Vec<Paragraph>, String>>);

	spawn_local(async move {
		let result = client.all_paragraphs().await.map_err(|e| {
			warn!("could not load paragraphs: {e}");
			e.to_string()
		});
		if let Ok(paragraphs) = &result {
			info!("loaded {} paragraphs", paragraphs.len());
		}
		let _ = listing.try_set(Some(result));
	});

	let body = move || match listing.get() {
		None => view! { <div class="status">"Loading paragraphs..."</div> }.into_any(),
		Some(Err(reason)) => {
			view! { <div class="status">"Error loading paragraphs: " {reason}</div> }.into_any()
		}
		Some(Ok(paragraphs)) => group_by_title(paragraphs)
			.into_iter()
			.map(|(title, members)| {
				view! {
					<section>
						<h2>{title}</h2>
						{members
							.into_iter()
							.map(|p| view! { <p data-para-id=p.para_id.to_string()>{p.para_text}</p> })
							.collect_view()}
					</section>
				}
			})
			.collect_view()
			.into_any(),
	};

	view! {
		<div class="paragraphs">
			<h1 class="title">"All paragraphs"</h1>
			{body}
		</div>
	}
}
