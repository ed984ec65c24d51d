use super::layout::{LayoutResult, NodePlacement};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
/// Padding kept around the graph by `fit_view`, as a fraction of the viewport.
pub const FIT_PADDING: f64 = 0.1;
/// Pointer travel (screen pixels) below which a press-release counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Set once the pointer has travelled past `CLICK_SLOP`.
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	/// Node under the pointer when the press started.
	pub pressed: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub highlight_t: f64,
}

/// Everything the canvas needs between frames.
///
/// Node geometry comes from the layout and is never written by pointer input;
/// only the viewport transform moves.
pub struct ConceptGraphState {
	pub layout: LayoutResult,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl ConceptGraphState {
	pub fn new(layout: LayoutResult, width: f64, height: f64) -> Self {
		let mut state = Self {
			layout,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		};
		state.fit_view();
		state
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// Last drawn wins, matching paint order.
		self.layout.nodes.iter().rposition(|node| node.contains(gx, gy))
	}

	pub fn placement(&self, idx: usize) -> Option<&NodePlacement> {
		self.layout.nodes.get(idx)
	}

	/// Centres the layout in the viewport, shrinking it to fit but never enlarging past 1:1.
	pub fn fit_view(&mut self) {
		let bounds = self.layout.bounds;
		let (avail_w, avail_h) = (
			self.width * (1.0 - 2.0 * FIT_PADDING),
			self.height * (1.0 - 2.0 * FIT_PADDING),
		);
		let k = if bounds.width <= 0.0 || bounds.height <= 0.0 {
			1.0
		} else {
			(avail_w / bounds.width).min(avail_h / bounds.height)
		};
		let k = k.min(1.0).clamp(MIN_ZOOM, MAX_ZOOM);
		self.transform = ViewTransform {
			x: (self.width - bounds.width * k) / 2.0,
			y: (self.height - bounds.height * k) / 2.0,
			k,
		};
	}

	/// Zooms by `factor` keeping the graph point under (sx, sy) fixed on screen.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn zoom_by(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	pub fn begin_pointer(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
			pressed: self.node_at_position(x, y),
		};
	}

	pub fn move_pointer(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
			return;
		}
		let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
		if !self.pan.moved && (dx * dx + dy * dy).sqrt() < CLICK_SLOP {
			return;
		}
		self.pan.moved = true;
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
	}

	/// Ends the gesture. Returns the clicked node id when the press and release
	/// landed on the same node without panning.
	pub fn end_pointer(&mut self, x: f64, y: f64) -> Option<String> {
		let pan = std::mem::take(&mut self.pan);
		if !pan.active || pan.moved {
			return None;
		}
		let released = self.node_at_position(x, y);
		match (pan.pressed, released) {
			(Some(a), Some(b)) if a == b => self.placement(a).map(|node| node.id.clone()),
			_ => None,
		}
	}

	pub fn cancel_pointer(&mut self) {
		self.pan = PanState::default();
		self.set_hover(None);
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.hover.node = node;
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * (6.0 * dt).min(1.0);
		if self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.fit_view();
	}
}
