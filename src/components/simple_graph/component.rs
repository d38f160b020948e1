use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent,
	WheelEvent, Window,
};

use super::render;
use super::state::DrawingState;
use crate::clock::now_ms;
use crate::error::{DrawingError, Result};
use crate::options::GraphOptions;
use crate::random;

type Shared<T> = Rc<RefCell<Option<T>>>;
type Callback = Closure<dyn FnMut()>;
type KeyCallback = Closure<dyn FnMut(KeyboardEvent)>;

/// Cleared when the component unmounts. The animation loop notices on its
/// next frame and tears the drawing down.
#[derive(Clone, Debug)]
struct Liveness(Arc<AtomicBool>);

impl Liveness {
	fn new() -> Self {
		Self(Arc::new(AtomicBool::new(true)))
	}

	fn end(&self) {
		self.0.store(false, Ordering::Relaxed);
	}

	fn is_alive(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

fn window_size(window: &Window) -> Result<(f64, f64)> {
	let width = window.inner_width()?.as_f64().unwrap_or(800.0);
	let height = window.inner_height()?.as_f64().unwrap_or(600.0);
	Ok((width, height))
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Full-window canvas showing a generated graph while its layout runs.
#[component]
pub fn SimpleGraph(
	options: GraphOptions,
	/// Set to true to cut the layout short.
	#[prop(into)]
	stop: Signal<bool>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<DrawingState> = Rc::new(RefCell::new(None));
	let animate: Shared<Callback> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Callback> = Rc::new(RefCell::new(None));
	let key_cbs: Rc<RefCell<Vec<KeyCallback>>> = Rc::new(RefCell::new(Vec::new()));
	let (info_html, set_info_html) = signal(String::new());
	let (stats_text, set_stats_text) = signal(String::new());

	let (show_stats, show_info) = (options.show_stats, options.show_info);
	let alive = Liveness::new();
	on_cleanup({
		let alive = alive.clone();
		move || alive.end()
	});

	let (state_init, animate_init, resize_init, keys_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		key_cbs.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let mounted = mount(
			canvas,
			options.clone(),
			MountHandles {
				state: state_init.clone(),
				animate: animate_init.clone(),
				resize: resize_init.clone(),
				keys: keys_init.clone(),
				alive: alive.clone(),
			},
			Overlay {
				stop,
				set_info_html,
				set_stats_text,
				show_stats,
				show_info,
			},
		);
		if let Err(err) = mounted {
			error!("Could not set up graph drawing: {err}");
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.controls.pointer_down(ev.button(), x as f32, y as f32);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.set_pointer(Some((x, y)));
			s.controls.pointer_move(x as f32, y as f32);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.controls.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.controls.pointer_up();
			s.set_pointer(None);
		}
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref s) = *state_click.borrow() {
			s.click(x, y);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.controls.wheel(ev.delta_y() as f32, ev.delta_mode());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:wheel=on_wheel
			on:contextmenu=|ev: MouseEvent| ev.prevent_default()
			style="display: block;"
		/>
		<Show when=move || show_stats>
			<div class="graph-stats" style="position: absolute; top: 0px;">
				{move || stats_text.get()}
			</div>
		</Show>
		<Show when=move || show_info>
			<div id="graph-info" inner_html=move || info_html.get()></div>
		</Show>
	}
}

#[derive(Clone)]
struct MountHandles {
	state: Shared<DrawingState>,
	animate: Shared<Callback>,
	resize: Shared<Callback>,
	/// keydown then keyup listeners.
	keys: Rc<RefCell<Vec<KeyCallback>>>,
	alive: Liveness,
}

struct Overlay {
	stop: Signal<bool>,
	set_info_html: WriteSignal<String>,
	set_stats_text: WriteSignal<String>,
	show_stats: bool,
	show_info: bool,
}

fn mount(
	canvas: HtmlCanvasElement,
	options: GraphOptions,
	handles: MountHandles,
	overlay: Overlay,
) -> Result<()> {
	let window = web_sys::window().ok_or(DrawingError::NoWindow)?;
	let (w, h) = window_size(&window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(DrawingError::NoContext)?
		.dyn_into()
		.map_err(|_| DrawingError::NoContext)?;

	let image = match options.texture.as_deref() {
		Some(src) => {
			let img = HtmlImageElement::new()?;
			img.set_src(src);
			Some(img)
		}
		None => None,
	};

	let mut rng = random::source(options.seed);
	*handles.state.borrow_mut() = Some(DrawingState::new(options, w, h, rng.as_mut(), now_ms()));

	let (state_resize, canvas_resize) = (handles.state.clone(), canvas.clone());
	*handles.resize.borrow_mut() = Some(Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		let Ok((nw, nh)) = window_size(&win) else {
			return;
		};
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		if let Some(ref mut s) = *state_resize.borrow_mut() {
			s.resize(nw, nh);
		}
	}));
	if let Some(ref cb) = *handles.resize.borrow() {
		window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
	}

	let state_down = handles.state.clone();
	let key_down: KeyCallback = Closure::new(move |ev: KeyboardEvent| {
		if let Some(ref mut s) = *state_down.borrow_mut() {
			s.controls.key_down(ev.key_code());
		}
	});
	let state_up = handles.state.clone();
	let key_up: KeyCallback = Closure::new(move |_: KeyboardEvent| {
		if let Some(ref mut s) = *state_up.borrow_mut() {
			s.controls.key_up();
		}
	});
	window.add_event_listener_with_callback("keydown", key_down.as_ref().unchecked_ref())?;
	window.add_event_listener_with_callback("keyup", key_up.as_ref().unchecked_ref())?;
	handles.keys.borrow_mut().extend([key_down, key_up]);

	let loop_handles = handles.clone();
	let (state_anim, animate_inner) = (handles.state.clone(), handles.animate.clone());
	let mut last_info = String::new();
	let mut last_stats = String::new();
	*handles.animate.borrow_mut() = Some(Closure::new(move || {
		if !loop_handles.alive.is_alive() {
			if let Some(win) = web_sys::window() {
				teardown(&win, &loop_handles);
			}
			return;
		}
		if let Some(ref mut s) = *state_anim.borrow_mut() {
			if overlay.stop.get_untracked() && !s.layout.finished() {
				s.stop_calculating();
			}
			s.frame(now_ms());
			render::render(s, &ctx, image.as_ref());

			if overlay.show_info {
				let info = s.info.render();
				if info != last_info {
					overlay.set_info_html.set(info.clone());
					last_info = info;
				}
			}
			if overlay.show_stats {
				let stats = s.stats.text();
				if stats != last_stats {
					overlay.set_stats_text.set(stats.clone());
					last_stats = stats;
				}
			}
		}
		if let Some(ref cb) = *animate_inner.borrow() {
			if let Some(win) = web_sys::window() {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}
	}));
	if let Some(ref cb) = *handles.animate.borrow() {
		window.request_animation_frame(cb.as_ref().unchecked_ref())?;
	}
	Ok(())
}

/// Remove the window listeners and drop the drawing. Called from inside the
/// animation closure, which is dropped from a later task.
fn teardown(window: &Window, handles: &MountHandles) {
	if let Some(cb) = handles.resize.borrow_mut().take() {
		let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
	for (event, cb) in ["keydown", "keyup"]
		.into_iter()
		.zip(handles.keys.borrow_mut().drain(..))
	{
		let _ = window.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
	}
	handles.state.borrow_mut().take();
	if let Some(cb) = handles.animate.borrow_mut().take() {
		let release = Closure::once_into_js(move || drop(cb));
		let _ = window.set_timeout_with_callback(release.unchecked_ref());
	}
	info!("Drawing unmounted, animation stopped");
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn liveness_is_shared_between_clones() {
		let alive = Liveness::new();
		let handle = alive.clone();
		assert!(alive.is_alive());
		handle.end();
		assert!(!alive.is_alive());
		handle.end();
		assert!(!handle.is_alive());
	}
}
