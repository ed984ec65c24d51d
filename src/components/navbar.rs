use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::contact::ContactForm;

/// Top navigation: logo, page tabs and the slide-out contact sidebar.
#[component]
pub fn Navbar() -> impl IntoView {
	let sidebar_open = RwSignal::new(false);
	let toggle = move |_| sidebar_open.update(|open| *open = !*open);

	view! {
		<nav class="nav">
			<A href="/">
				<img class="logo" width="90" height="90" src="/Y.svg" alt="Personal logo" />
			</A>

			<div class="tabs">
				<A href="/" attr:class="tab">
					"About Me"
				</A>
				<A href="/projects" attr:class="tab">
					"Projects"
				</A>
			</div>

			<button class="sidebar-tab" aria-label="Open contact sidebar" on:click=toggle>
				"☰"
			</button>

			<Sidebar open=sidebar_open.read_only() on_close=Callback::new(move |()| sidebar_open.set(false))>
				<ContactForm />
			</Sidebar>
		</nav>
	}
}

#[component]
fn Sidebar(open: ReadSignal<bool>, on_close: Callback<()>, children: Children) -> impl IntoView {
	view! {
		<aside class="sidebar" class:open=move || open.get()>
			{children()}
			<button class="sidebar-close" aria-label="Close sidebar" on:click=move |_| on_close.run(())>
				"▸"
			</button>
		</aside>
	}
}
