use leptos::ev;
use leptos::prelude::*;

use super::state::OverlayState;

/// Dismissible panel showing the paragraphs of the open concept node.
///
/// The panel appears as soon as a node is opened and paragraphs fill in when
/// the fetch resolves. It leaves the graph clickable, so picking another node
/// switches the panel and picking the open node again closes it.
#[component]
pub fn DetailOverlay(
	state: RwSignal<OverlayState>,
	/// Heading for the open node, usually its label.
	#[prop(into)]
	title: Signal<Option<String>>,
) -> impl IntoView {
	let close = move || state.update(|s| s.close());

	let escape = window_event_listener(ev::keydown, move |evt| {
		if evt.key() == "Escape" && state.with_untracked(|s| s.is_open()) {
			close();
		}
	});
	on_cleanup(move || escape.remove());

	let paragraphs = move || {
		state.with(|s| {
			s.records()
				.iter()
				.map(|para| {
					view! {
						<div class="detail-paragraph">
							<p>{para.para_text.clone()}</p>
						</div>
					}
				})
				.collect_view()
		})
	};

	view! {
		<Show when=move || state.with(|s| s.is_open())>
			<aside class="detail-panel" role="dialog" aria-modal="false">
				<button class="detail-close" aria-label="Close" on:click=move |_| close()>
					"×"
				</button>
				<h1>{move || title.get().unwrap_or_default()}</h1>
				{paragraphs}
			</aside>
		</Show>
	}
}
