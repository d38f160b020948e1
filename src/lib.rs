//! Force-directed graph drawings rendered to a canvas in the browser.
//!
//! A drawing generates a graph, scatters its nodes, then runs one step of
//! the force-directed layout per animation frame while a trackball camera
//! looks at the result in 2d or 3d.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod camera;
mod clock;
mod components;
mod error;
mod generate;
mod graph;
mod layout;
mod options;
mod overlay;
mod pages;
mod random;
mod scene;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Router for the graph page and 404's.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />

		<Title text="Graph Visualization" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
