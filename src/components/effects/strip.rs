use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use log::debug;
use wasm_bindgen_futures::spawn_local;

const STRIP_CLASS: &str = "strip";

fn delay_millis(delay: Duration) -> u32 {
	u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// Animated strip that replays its CSS animation `restart_delay` after each run ends.
#[component]
pub fn Strip(#[prop(default = Duration::from_secs(5))] restart_delay: Duration) -> impl IntoView {
	let strip_ref = NodeRef::<leptos::html::Div>::new();
	let millis = delay_millis(restart_delay);

	let on_animation_end = move |_| {
		debug!("strip animation ended; restarting in {millis} ms");
		spawn_local(async move {
			TimeoutFuture::new(millis).await;
			// Unmounted while waiting.
			let Some(strip) = strip_ref.get_untracked() else {
				return;
			};
			let classes = strip.class_list();
			let _ = classes.remove_1(STRIP_CLASS);
			// Reading layout forces a reflow so the re-added class starts a fresh run.
			let _ = strip.offset_height();
			let _ = classes.add_1(STRIP_CLASS);
		});
	};

	view! { <div node_ref=strip_ref class=STRIP_CLASS on:animationend=on_animation_end></div> }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn delay_converts_to_millis() {
		assert_eq!(delay_millis(Duration::from_secs(5)), 5000);
		assert_eq!(delay_millis(Duration::from_secs(u64::MAX)), u32::MAX);
	}
}
