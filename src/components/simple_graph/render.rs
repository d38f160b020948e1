use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::state::{DrawingState, NodeFill};
use crate::camera::Projected;
use crate::scene::{self, EDGE_COLOR, NodeShape};

const LABEL_COLOR: &str = "#dddddd";

pub fn render(
	state: &DrawingState,
	ctx: &CanvasRenderingContext2d,
	texture: Option<&HtmlImageElement>,
) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);

	let texture = texture.filter(|img| scene::texture_ready(img.complete(), img.natural_width()));
	let projected = state.projected_nodes();
	for (idx, p) in &projected {
		match (state.node_fill(*idx, texture.is_some()), texture) {
			(NodeFill::Texture { outline }, Some(img)) => {
				draw_textured_node(state, ctx, img, p, outline)
			}
			(NodeFill::Color(color), _) => draw_node(state, ctx, color, p),
			(NodeFill::Texture { .. }, None) => {}
		}
	}

	if state.options.show_labels {
		draw_labels(state, ctx);
	}
}

fn draw_edges(state: &DrawingState, ctx: &CanvasRenderingContext2d) {
	let vp = state.camera.view_projection();
	let nodes = state.graph.nodes();

	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	for (source, target) in state.graph.edge_indices() {
		let Some((a, b)) =
			state
				.camera
				.project_segment(&vp, nodes[source].position, nodes[target].position)
		else {
			continue;
		};
		ctx.move_to(a.x as f64, a.y as f64);
		ctx.line_to(b.x as f64, b.y as f64);
	}
	ctx.stroke();
}

/// Trace the node's outline at `p` as the current path.
fn node_path(state: &DrawingState, ctx: &CanvasRenderingContext2d, p: &Projected) {
	let half = state.shape.half_extent(p);
	ctx.begin_path();
	match state.shape {
		NodeShape::Sphere { .. } => {
			let _ = ctx.arc(p.x, p.y, half.max(0.5), 0.0, 2.0 * PI);
		}
		NodeShape::Square { .. } => {
			let side = (half * 2.0).max(1.0);
			ctx.rect(p.x - side / 2.0, p.y - side / 2.0, side, side);
		}
	}
}

fn draw_node(state: &DrawingState, ctx: &CanvasRenderingContext2d, color: u32, p: &Projected) {
	ctx.set_fill_style_str(&scene::css_color(color));
	node_path(state, ctx, p);
	ctx.fill();
}

fn draw_textured_node(
	state: &DrawingState,
	ctx: &CanvasRenderingContext2d,
	img: &HtmlImageElement,
	p: &Projected,
	outline: Option<u32>,
) {
	let half = state.shape.half_extent(p).max(0.5);
	let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
		img,
		p.x - half,
		p.y - half,
		half * 2.0,
		half * 2.0,
	);
	if let Some(color) = outline {
		ctx.set_stroke_style_str(&scene::css_color(color));
		ctx.set_line_width(2.0);
		node_path(state, ctx, p);
		ctx.stroke();
	}
}

fn draw_labels(state: &DrawingState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");
	for (text, p) in state.labels() {
		let _ = ctx.fill_text(&text, p.x, p.y);
	}
}
