//! Browser entry point: mounts the graph drawing app.

use graphvis_canvas::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App)
}
