//! Browser entry point.

#![allow(unused_crate_dependencies)]

use concept_graph_portfolio::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
