use std::fmt;

/// Flow direction of the layered drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
	#[default]
	TopToBottom,
	LeftToRight,
}

impl Direction {
	/// Side of a node that faces its incoming edges.
	pub fn target_side(self) -> Side {
		match self {
			Direction::TopToBottom => Side::Top,
			Direction::LeftToRight => Side::Left,
		}
	}

	/// Side of a node that faces its outgoing edges.
	pub fn source_side(self) -> Side {
		match self {
			Direction::TopToBottom => Side::Bottom,
			Direction::LeftToRight => Side::Right,
		}
	}

	pub fn is_horizontal(self) -> bool {
		matches!(self, Direction::LeftToRight)
	}

	/// Accepts the usual rank-direction shorthands ("TB", "LR") as well as the full names.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_uppercase().as_str() {
			"TB" | "TD" | "TOPTOBOTTOM" | "TOP_TO_BOTTOM" => Some(Direction::TopToBottom),
			"LR" | "LEFTTORIGHT" | "LEFT_TO_RIGHT" => Some(Direction::LeftToRight),
			_ => None,
		}
	}
}

/// Connection point on a node box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
	Top,
	Bottom,
	Left,
	Right,
}

impl Side {
	pub fn handle(self) -> &'static str {
		match self {
			Side::Top => "top",
			Side::Bottom => "bottom",
			Side::Left => "left",
			Side::Right => "right",
		}
	}

	/// Unit vector pointing out of the box through this side.
	pub fn outward(self) -> (f64, f64) {
		match self {
			Side::Top => (0.0, -1.0),
			Side::Bottom => (0.0, 1.0),
			Side::Left => (-1.0, 0.0),
			Side::Right => (1.0, 0.0),
		}
	}

	pub fn is_vertical(self) -> bool {
		matches!(self, Side::Top | Side::Bottom)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// One thematic section of the About-Me narrative.
///
/// Nodes never carry a position of their own: placement belongs to the layout engine.
#[derive(Clone, Debug, PartialEq)]
pub struct ConceptNode {
	pub id: String,
	pub label: String,
	/// Always false. The canvas has no node-drag path.
	pub draggable: bool,
}

impl ConceptNode {
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			draggable: false,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConceptEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub source_handle: Side,
	pub target_handle: Side,
	/// Presentation only.
	pub animated: bool,
}

impl ConceptEdge {
	/// Edge between two nodes with handles matching `direction`, id `e{source}-{target}`.
	pub fn between(source: &str, target: &str, direction: Direction) -> Self {
		Self {
			id: edge_id(source, target),
			source: source.to_string(),
			target: target.to_string(),
			source_handle: direction.source_side(),
			target_handle: direction.target_side(),
			animated: true,
		}
	}
}

pub fn edge_id(source: &str, target: &str) -> String {
	format!("e{source}-{target}")
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConceptGraph {
	pub nodes: Vec<ConceptNode>,
	pub edges: Vec<ConceptEdge>,
}

impl ConceptGraph {
	pub fn node(&self, id: &str) -> Option<&ConceptNode> {
		self.nodes.iter().find(|node| node.id == id)
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Direction::TopToBottom => "TB",
			Direction::LeftToRight => "LR",
		})
	}
}
