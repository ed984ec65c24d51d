//! Personal portfolio site: app wiring and routes.
//!
//! The About page lays out a fixed concept graph on a canvas; clicking a
//! node opens an overlay with paragraphs fetched from the content store.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod components;
pub mod config;
pub mod content;
mod pages;

pub use components::about_graph::AboutGraph;

use crate::components::navbar::Navbar;
use crate::config::SiteConfig;
use crate::content::ContentClient;
// Top-Level pages
use crate::pages::about::About;
use crate::pages::contact::Contact;
use crate::pages::not_found::NotFound;
use crate::pages::paragraphs::Paragraphs;
use crate::pages::projects::Projects;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Site shell: navbar above the routed pages, with config and content client in context.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = SiteConfig::from_env();
	info!(
		"content store at {:?}, graph direction {}",
		config.api_base, config.direction
	);
	provide_context(ContentClient::new(&config.api_base));
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		<Title text="Yanheng Chen's Blog" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="description" content="Yanheng Chen's Blog" />

		<Router>
			<Navbar />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=About />
					<Route path=path!("/projects") view=Projects />
					<Route path=path!("/contact") view=Contact />
					<Route path=path!("/paragraphs") view=Paragraphs />
				</Routes>
			</main>
		</Router>
	}
}
