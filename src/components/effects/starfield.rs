use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	/// Horizontal position as a fraction of the container, in [0, 1).
	pub x: f64,
	pub y: f64,
	/// Twinkle period in seconds, in [0.5, 2.5).
	pub duration: f64,
}

/// `count` stars drawn from `random`, which must yield values in [0, 1).
pub fn generate_stars(count: usize, mut random: impl FnMut() -> f64) -> Vec<Star> {
	(0..count)
		.map(|_| Star {
			x: random(),
			y: random(),
			duration: random() * 2.0 + 0.5,
		})
		.collect()
}

/// Decorative background of twinkling stars, placed once at mount.
#[component]
pub fn Starfield(#[prop(default = 20)] count: usize) -> impl IntoView {
	let stars = generate_stars(count, js_sys::Math::random);

	view! {
		<div class="starry-background" aria-hidden="true">
			{stars
				.into_iter()
				.map(|star| {
					let style = format!(
						"--random-x: {}; --random-y: {}; animation-duration: {}s;",
						star.x,
						star.y,
						star.duration
					);
					view! { <div class="star" style=style></div> }
				})
				.collect_view()}
		</div>
	}
}
