use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::{EdgeRoute, NodePlacement};
use super::state::ConceptGraphState;
use super::types::{Point, Side};

pub const CORNER_RADIUS: f64 = 6.0;
const NODE_RADIUS: f64 = 6.0;
const ARROW_SIZE: f64 = 7.0;
/// Seconds the light strip takes to cross a node box.
pub const STRIP_SWEEP: f64 = 3.0;
/// Pause before the strip crosses again.
pub const STRIP_REST: f64 = 5.0;

const BACKGROUND: &str = "#0f1024";
const EDGE_COLOR: &str = "rgba(177, 177, 183, 0.9)";
const NODE_FILL: &str = "#fdfdfd";
const NODE_STROKE: &str = "#1a192b";
const NODE_SELECTED: &str = "#ff0072";
const LABEL_COLOR: &str = "#222";
const STRIP_COLOR: &str = "rgba(138, 180, 255, 0.35)";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// How far the strip has crossed a box at `time`, or None while it rests.
pub fn strip_progress(time: f64, sweep: f64, rest: f64) -> Option<f64> {
	if sweep <= 0.0 {
		return None;
	}
	let phase = time.rem_euclid(sweep + rest);
	(phase < sweep).then(|| phase / sweep)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
	MoveTo(Point),
	LineTo(Point),
	/// Rounded corner at `corner`, leaving towards `toward`.
	ArcTo {
		corner: Point,
		toward: Point,
		radius: f64,
	},
}

/// Orthogonal path with rounded corners from the source anchor to the target
/// anchor, stepping half-way between each pair of stops along the flow axis.
pub fn smooth_step_path(route: &EdgeRoute, radius: f64) -> Vec<PathCommand> {
	let vertical = route.source_side.is_vertical();
	let stops: Vec<Point> = std::iter::once(route.start)
		.chain(route.bends.iter().copied())
		.chain(std::iter::once(route.end))
		.collect();

	let mut points = vec![stops[0]];
	for pair in stops.windows(2) {
		let (a, b) = (pair[0], pair[1]);
		if vertical {
			let mid = (a.y + b.y) / 2.0;
			points.extend([Point::new(a.x, mid), Point::new(b.x, mid), b]);
		} else {
			let mid = (a.x + b.x) / 2.0;
			points.extend([Point::new(mid, a.y), Point::new(mid, b.y), b]);
		}
	}
	let points = simplify(points);

	let mut commands = vec![PathCommand::MoveTo(points[0])];
	for i in 1..points.len().saturating_sub(1) {
		let (prev, corner, next) = (points[i - 1], points[i], points[i + 1]);
		let r = radius
			.min(distance(prev, corner) / 2.0)
			.min(distance(corner, next) / 2.0);
		commands.push(PathCommand::ArcTo {
			corner,
			toward: next,
			radius: r,
		});
	}
	if points.len() > 1 {
		commands.push(PathCommand::LineTo(points[points.len() - 1]));
	}
	commands
}

fn distance(a: Point, b: Point) -> f64 {
	((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Drops repeated points and the middle of collinear runs.
fn simplify(points: Vec<Point>) -> Vec<Point> {
	let mut out: Vec<Point> = Vec::with_capacity(points.len());
	for p in points {
		if out.last().is_some_and(|&last| distance(last, p) < 1e-9) {
			continue;
		}
		if out.len() >= 2 {
			let (a, b) = (out[out.len() - 2], out[out.len() - 1]);
			let cross = (b.x - a.x) * (p.y - b.y) - (b.y - a.y) * (p.x - b.x);
			if cross.abs() < 1e-9 {
				out.pop();
			}
		}
		out.push(p);
	}
	out
}

pub fn render(state: &ConceptGraphState, ctx: &CanvasRenderingContext2d, selected: Option<&str>) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx, selected);
	ctx.restore();
}

fn trace(ctx: &CanvasRenderingContext2d, commands: &[PathCommand]) {
	ctx.begin_path();
	for command in commands {
		match *command {
			PathCommand::MoveTo(p) => ctx.move_to(p.x, p.y),
			PathCommand::LineTo(p) => ctx.line_to(p.x, p.y),
			PathCommand::ArcTo {
				corner,
				toward,
				radius,
			} => {
				let _ = ctx.arc_to(corner.x, corner.y, toward.x, toward.y, radius);
			}
		}
	}
}

fn draw_edges(state: &ConceptGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap) = (5.0, 5.0);
	let dash_offset = -(state.flow_time * 20.0) % (dash + gap);

	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.set_line_width(1.5 / k.max(0.5));
	for route in &state.layout.edges {
		if route.animated {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}
		trace(ctx, &smooth_step_path(route, CORNER_RADIUS));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		draw_arrow(ctx, route.end, route.target_side);
	}
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, tip: Point, side: Side) {
	// Arrow points into the box, against the side's outward normal.
	let (ox, oy) = side.outward();
	let (back_x, back_y) = (tip.x + ox * ARROW_SIZE, tip.y + oy * ARROW_SIZE);
	let (px, py) = (-oy * ARROW_SIZE * 0.5, ox * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn rounded_box(ctx: &CanvasRenderingContext2d, node: &NodePlacement, r: f64) {
	let (x, y, w, h) = (node.position.x, node.position.y, node.width, node.height);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_nodes(state: &ConceptGraphState, ctx: &CanvasRenderingContext2d, selected: Option<&str>) {
	let t = ease_out_cubic(state.hover.highlight_t);
	let k = state.transform.k;
	let strip = strip_progress(state.flow_time, STRIP_SWEEP, STRIP_REST);

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font("14px sans-serif");
	for (idx, node) in state.layout.nodes.iter().enumerate() {
		let is_selected = selected == Some(node.id.as_str());
		let hovered = state.is_hovered(idx);

		if hovered && t > 0.01 {
			ctx.set_shadow_color(&format!("rgba(255, 255, 255, {})", 0.6 * t));
			ctx.set_shadow_blur(12.0 * t);
		}
		rounded_box(ctx, node, NODE_RADIUS);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();
		ctx.set_shadow_blur(0.0);

		if let Some(progress) = strip {
			let band = node.width * 0.3;
			ctx.save();
			ctx.clip();
			ctx.set_fill_style_str(STRIP_COLOR);
			ctx.fill_rect(
				node.position.x - band + (node.width + band) * progress,
				node.position.y,
				band,
				node.height,
			);
			ctx.restore();
			rounded_box(ctx, node, NODE_RADIUS);
		}

		let (stroke, width) = if is_selected {
			(NODE_SELECTED, 2.0)
		} else {
			(NODE_STROKE, 1.0)
		};
		ctx.set_stroke_style_str(stroke);
		ctx.set_line_width(width / k.max(0.5));
		ctx.stroke();

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&node.label, node.center.x, node.center.y);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn route(start: Point, bends: Vec<Point>, end: Point, source_side: Side) -> EdgeRoute {
		EdgeRoute {
			id: "e".into(),
			source: "a".into(),
			target: "b".into(),
			start,
			source_side,
			bends,
			end,
			target_side: Side::Top,
			animated: true,
		}
	}

	#[test]
	fn strip_sweeps_then_rests() {
		assert_eq!(strip_progress(0.0, STRIP_SWEEP, STRIP_REST), Some(0.0));
		assert_eq!(strip_progress(1.5, STRIP_SWEEP, STRIP_REST), Some(0.5));
		assert_eq!(strip_progress(4.0, STRIP_SWEEP, STRIP_REST), None);
		// Next run starts once the rest is over.
		assert_eq!(strip_progress(9.5, STRIP_SWEEP, STRIP_REST), Some(0.5));
		assert_eq!(strip_progress(1.0, 0.0, STRIP_REST), None);
	}

	#[test]
	fn aligned_endpoints_draw_a_straight_line() {
		let path = smooth_step_path(
			&route(Point::new(10.0, 0.0), vec![], Point::new(10.0, 50.0), Side::Bottom),
			CORNER_RADIUS,
		);
		assert_eq!(
			path,
			vec![
				PathCommand::MoveTo(Point::new(10.0, 0.0)),
				PathCommand::LineTo(Point::new(10.0, 50.0)),
			]
		);
	}

	#[test]
	fn offset_endpoints_step_at_the_midline() {
		let path = smooth_step_path(
			&route(Point::new(0.0, 0.0), vec![], Point::new(100.0, 50.0), Side::Bottom),
			CORNER_RADIUS,
		);
		assert_eq!(path.len(), 4);
		assert_eq!(
			path[1],
			PathCommand::ArcTo {
				corner: Point::new(0.0, 25.0),
				toward: Point::new(100.0, 25.0),
				radius: CORNER_RADIUS,
			}
		);
		assert_eq!(
			path[2],
			PathCommand::ArcTo {
				corner: Point::new(100.0, 25.0),
				toward: Point::new(100.0, 50.0),
				radius: CORNER_RADIUS,
			}
		);
	}

	#[test]
	fn corner_radius_shrinks_on_short_segments() {
		let path = smooth_step_path(
			&route(Point::new(0.0, 0.0), vec![], Point::new(4.0, 50.0), Side::Bottom),
			CORNER_RADIUS,
		);
		match path[1] {
			PathCommand::ArcTo { radius, .. } => assert_eq!(radius, 2.0),
			other => panic!("expected a corner, got {other:?}"),
		}
	}

	#[test]
	fn horizontal_flow_steps_on_x() {
		let path = smooth_step_path(
			&route(Point::new(0.0, 0.0), vec![], Point::new(80.0, 30.0), Side::Right),
			CORNER_RADIUS,
		);
		assert!(matches!(
			path[1],
			PathCommand::ArcTo { corner, .. } if corner == Point::new(40.0, 0.0)
		));
	}

	#[test]
	fn bends_are_visited_in_order() {
		let path = smooth_step_path(
			&route(
				Point::new(0.0, 0.0),
				vec![Point::new(0.0, 100.0)],
				Point::new(0.0, 200.0),
				Side::Bottom,
			),
			CORNER_RADIUS,
		);
		// Collinear through the bend, so it collapses to one segment.
		assert_eq!(
			path,
			vec![
				PathCommand::MoveTo(Point::new(0.0, 0.0)),
				PathCommand::LineTo(Point::new(0.0, 200.0)),
			]
		);
	}
}
