use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::simple_graph::SimpleGraph;
use crate::options::{GraphOptions, KEYS};

/// Default Home Page: one drawing configured from the query string.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let stop = RwSignal::new(false);

	let options = move || {
		let query = query.get();
		let pairs: Vec<(&str, String)> = KEYS
			.iter()
			.filter_map(|key| query.get(key).map(|value| (*key, value)))
			.collect();
		GraphOptions::from_pairs(pairs.iter().map(|(key, value)| (*key, value.as_str())))
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{move || {
				options()
					.map(|opts| {
						view! {
							<div class="fullscreen-graph">
								<SimpleGraph options=opts stop=stop />
								<div class="graph-overlay">
									<button
										on:click=move |_| stop.set(true)
										disabled=move || stop.get()
									>
										"Stop layout"
									</button>
								</div>
							</div>
						}
					})
			}}
		</ErrorBoundary>
	}
}
