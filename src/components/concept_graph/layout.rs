//! Layered (Sugiyama-style) layout for the concept graph.
//!
//! Phases:
//!   1. Validation (dangling edges, duplicate ids, handle orientation)
//!   2. Rank assignment by longest path, ignoring DFS back edges
//!   3. Virtual nodes on edges that span several ranks
//!   4. Crossing reduction (barycenter sweeps, best ordering kept)
//!   5. In-rank coordinates projected onto minimum separations
//!   6. Top-left anchoring and edge anchor resolution
//!
//! The whole computation is a pure function of its inputs; every iteration
//! runs over vectors in input order so equal inputs give equal output.

use std::collections::{HashMap, VecDeque};

use log::{debug, warn};
use thiserror::Error;

use super::types::{ConceptEdge, ConceptNode, Direction, Point, Side};

/// Uniform box used for every node, whatever its label length.
pub const NODE_WIDTH: f64 = 172.0;
pub const NODE_HEIGHT: f64 = 36.0;
/// Gap between consecutive ranks.
pub const RANK_SEP: f64 = 50.0;
/// Gap between neighbouring boxes in one rank.
pub const NODE_SEP: f64 = 50.0;
/// Gap reserved around virtual (edge bend) nodes.
pub const EDGE_SEP: f64 = 10.0;

const ORDER_ITERATIONS: usize = 8;
const PLACEMENT_PASSES: usize = 4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
	#[error("edge {edge} references unknown node {missing}")]
	DanglingEdge { edge: String, missing: String },
	#[error("node {0} is defined more than once")]
	DuplicateNode(String),
	#[error("edge {edge} attaches to the {handle} handle, which does not face the flow direction")]
	HandleMismatch { edge: String, handle: &'static str },
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodePlacement {
	pub id: String,
	pub label: String,
	pub rank: usize,
	/// Index within the rank after crossing reduction.
	pub order: usize,
	/// Top-left corner of the box.
	pub position: Point,
	pub center: Point,
	pub width: f64,
	pub height: f64,
	pub target_side: Side,
	pub source_side: Side,
}

impl NodePlacement {
	pub fn anchor(&self, side: Side) -> Point {
		let (hw, hh) = (self.width / 2.0, self.height / 2.0);
		match side {
			Side::Top => Point::new(self.center.x, self.center.y - hh),
			Side::Bottom => Point::new(self.center.x, self.center.y + hh),
			Side::Left => Point::new(self.center.x - hw, self.center.y),
			Side::Right => Point::new(self.center.x + hw, self.center.y),
		}
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.position.x
			&& x <= self.position.x + self.width
			&& y >= self.position.y
			&& y <= self.position.y + self.height
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRoute {
	pub id: String,
	pub source: String,
	pub target: String,
	pub start: Point,
	pub source_side: Side,
	/// Centres of the virtual nodes the edge passes through, source to target.
	pub bends: Vec<Point>,
	pub end: Point,
	pub target_side: Side,
	pub animated: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
	pub direction: Direction,
	/// Placements in input order.
	pub nodes: Vec<NodePlacement>,
	pub edges: Vec<EdgeRoute>,
	pub bounds: Bounds,
	/// Ids of edges left out because they referenced unknown nodes.
	pub skipped: Vec<String>,
}

impl LayoutResult {
	pub fn node(&self, id: &str) -> Option<&NodePlacement> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn rank_of(&self, id: &str) -> Option<usize> {
		self.node(id).map(|n| n.rank)
	}

	/// Node ids grouped by rank, each rank in its final order.
	pub fn ranks(&self) -> Vec<Vec<String>> {
		let count = self.nodes.iter().map(|n| n.rank + 1).max().unwrap_or(0);
		let mut ranks: Vec<Vec<&NodePlacement>> = vec![Vec::new(); count];
		for node in &self.nodes {
			ranks[node.rank].push(node);
		}
		ranks
			.into_iter()
			.map(|mut rank| {
				rank.sort_by_key(|n| n.order);
				rank.into_iter().map(|n| n.id.clone()).collect()
			})
			.collect()
	}
}

/// Lays out the graph, skipping (and logging) anything malformed.
pub fn layout(nodes: &[ConceptNode], edges: &[ConceptEdge], direction: Direction) -> LayoutResult {
	let (input, issues) = Input::prepare(nodes, edges, direction);
	for issue in &issues {
		warn!("concept graph layout: {issue}");
	}
	compute(&input, direction)
}

/// Lays out the graph, failing on the first malformed node or edge.
pub fn layout_strict(
	nodes: &[ConceptNode],
	edges: &[ConceptEdge],
	direction: Direction,
) -> Result<LayoutResult, LayoutError> {
	let (input, mut issues) = Input::prepare(nodes, edges, direction);
	if !issues.is_empty() {
		return Err(issues.remove(0));
	}
	Ok(compute(&input, direction))
}

struct Input<'a> {
	nodes: Vec<&'a ConceptNode>,
	/// (source index, target index, edge) for every edge that resolved.
	edges: Vec<(usize, usize, &'a ConceptEdge)>,
	skipped: Vec<String>,
}

impl<'a> Input<'a> {
	fn prepare(
		nodes: &'a [ConceptNode],
		edges: &'a [ConceptEdge],
		direction: Direction,
	) -> (Self, Vec<LayoutError>) {
		let mut issues = Vec::new();
		let mut kept = Vec::with_capacity(nodes.len());
		let mut index = HashMap::with_capacity(nodes.len());
		for node in nodes {
			if index.contains_key(node.id.as_str()) {
				issues.push(LayoutError::DuplicateNode(node.id.clone()));
				continue;
			}
			index.insert(node.id.as_str(), kept.len());
			kept.push(node);
		}

		let mut resolved = Vec::with_capacity(edges.len());
		let mut skipped = Vec::new();
		for edge in edges {
			let lookup = |id: &str| index.get(id).copied();
			match (lookup(&edge.source), lookup(&edge.target)) {
				(Some(s), Some(t)) => {
					if edge.source_handle != direction.source_side() {
						issues.push(LayoutError::HandleMismatch {
							edge: edge.id.clone(),
							handle: edge.source_handle.handle(),
						});
					} else if edge.target_handle != direction.target_side() {
						issues.push(LayoutError::HandleMismatch {
							edge: edge.id.clone(),
							handle: edge.target_handle.handle(),
						});
					}
					resolved.push((s, t, edge));
				}
				(source, _) => {
					let missing = if source.is_none() {
						&edge.source
					} else {
						&edge.target
					};
					issues.push(LayoutError::DanglingEdge {
						edge: edge.id.clone(),
						missing: missing.clone(),
					});
					skipped.push(edge.id.clone());
				}
			}
		}

		(
			Self {
				nodes: kept,
				edges: resolved,
				skipped,
			},
			issues,
		)
	}
}

/// A rank member: either a real node or a bend point of a long edge.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Member {
	Node(usize),
	Virtual,
}

struct Layered {
	kind: Vec<Member>,
	rank: Vec<usize>,
	preds: Vec<Vec<usize>>,
	succs: Vec<Vec<usize>>,
	/// Virtual chain per input edge index, when the edge spans several ranks.
	chains: HashMap<usize, Vec<usize>>,
}

impl Layered {
	fn add(&mut self, kind: Member, rank: usize) -> usize {
		self.kind.push(kind);
		self.rank.push(rank);
		self.preds.push(Vec::new());
		self.succs.push(Vec::new());
		self.kind.len() - 1
	}

	fn link(&mut self, from: usize, to: usize) {
		self.succs[from].push(to);
		self.preds[to].push(from);
	}

	fn extent(&self, member: usize, direction: Direction) -> f64 {
		match self.kind[member] {
			Member::Node(_) if direction.is_horizontal() => NODE_HEIGHT,
			Member::Node(_) => NODE_WIDTH,
			Member::Virtual => 0.0,
		}
	}

	fn spacing(&self, member: usize) -> f64 {
		match self.kind[member] {
			Member::Node(_) => NODE_SEP,
			Member::Virtual => EDGE_SEP,
		}
	}

	fn gap(&self, a: usize, b: usize, direction: Direction) -> f64 {
		(self.extent(a, direction) + self.extent(b, direction)) / 2.0
			+ (self.spacing(a) + self.spacing(b)) / 2.0
	}
}

fn compute(input: &Input<'_>, direction: Direction) -> LayoutResult {
	let n = input.nodes.len();
	let forward = acyclic_edges(n, &input.edges);
	let ranks = longest_path_ranks(n, &input.edges, &forward);

	let mut layered = Layered {
		kind: Vec::new(),
		rank: Vec::new(),
		preds: Vec::new(),
		succs: Vec::new(),
		chains: HashMap::new(),
	};
	for (i, &rank) in ranks.iter().enumerate() {
		layered.add(Member::Node(i), rank);
	}
	for (edge_idx, &(s, t, _)) in input.edges.iter().enumerate() {
		if !forward[edge_idx] {
			continue;
		}
		let mut prev = s;
		let mut chain = Vec::new();
		for rank in ranks[s] + 1..ranks[t] {
			let v = layered.add(Member::Virtual, rank);
			layered.link(prev, v);
			chain.push(v);
			prev = v;
		}
		layered.link(prev, t);
		if !chain.is_empty() {
			layered.chains.insert(edge_idx, chain);
		}
	}

	let layers = order_layers(&layered);
	let coords = assign_coordinates(&layered, &layers, direction);

	let rank_extent = if direction.is_horizontal() {
		NODE_WIDTH
	} else {
		NODE_HEIGHT
	};
	let centre_of = |member: usize| -> Point {
		let along = coords[member];
		let across = layered.rank[member] as f64 * (rank_extent + RANK_SEP) + rank_extent / 2.0;
		if direction.is_horizontal() {
			Point::new(across, along)
		} else {
			Point::new(along, across)
		}
	};

	let mut min_x = f64::INFINITY;
	let mut min_y = f64::INFINITY;
	let mut max_x = f64::NEG_INFINITY;
	let mut max_y = f64::NEG_INFINITY;
	for member in 0..layered.kind.len() {
		let c = centre_of(member);
		let (hw, hh) = match layered.kind[member] {
			Member::Node(_) => (NODE_WIDTH / 2.0, NODE_HEIGHT / 2.0),
			Member::Virtual => (0.0, 0.0),
		};
		min_x = min_x.min(c.x - hw);
		min_y = min_y.min(c.y - hh);
		max_x = max_x.max(c.x + hw);
		max_y = max_y.max(c.y + hh);
	}
	if n == 0 {
		(min_x, min_y, max_x, max_y) = (0.0, 0.0, 0.0, 0.0);
	}
	let shift = |p: Point| Point::new(p.x - min_x, p.y - min_y);

	let mut order_of = vec![0; layered.kind.len()];
	for layer in &layers {
		for (pos, &member) in layer.iter().enumerate() {
			order_of[member] = pos;
		}
	}

	let nodes: Vec<NodePlacement> = input
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let center = shift(centre_of(i));
			NodePlacement {
				id: node.id.clone(),
				label: node.label.clone(),
				rank: ranks[i],
				order: order_of[i],
				position: Point::new(center.x - NODE_WIDTH / 2.0, center.y - NODE_HEIGHT / 2.0),
				center,
				width: NODE_WIDTH,
				height: NODE_HEIGHT,
				target_side: direction.target_side(),
				source_side: direction.source_side(),
			}
		})
		.collect();

	let edges = input
		.edges
		.iter()
		.enumerate()
		.map(|(edge_idx, &(s, t, edge))| {
			let (source, target) = (&nodes[s], &nodes[t]);
			let bends = layered
				.chains
				.get(&edge_idx)
				.map(|chain| chain.iter().map(|&v| shift(centre_of(v))).collect())
				.unwrap_or_default();
			EdgeRoute {
				id: edge.id.clone(),
				source: edge.source.clone(),
				target: edge.target.clone(),
				start: source.anchor(source.source_side),
				source_side: source.source_side,
				bends,
				end: target.anchor(target.target_side),
				target_side: target.target_side,
				animated: edge.animated,
			}
		})
		.collect();

	debug!(
		"concept graph layout: {} nodes, {} ranks, {} virtual, direction {}",
		n,
		layers.len(),
		layered.kind.len() - n,
		direction
	);

	LayoutResult {
		direction,
		nodes,
		edges,
		bounds: Bounds {
			width: max_x - min_x,
			height: max_y - min_y,
		},
		skipped: input.skipped.clone(),
	}
}

/// Marks each edge as forward (true) or as a DFS back edge / self loop (false).
///
/// The search starts from roots in input order, then from whatever is left.
fn acyclic_edges(n: usize, edges: &[(usize, usize, &ConceptEdge)]) -> Vec<bool> {
	let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
	let mut indegree = vec![0usize; n];
	for (edge_idx, &(s, t, _)) in edges.iter().enumerate() {
		out[s].push(edge_idx);
		if s != t {
			indegree[t] += 1;
		}
	}

	#[derive(Clone, Copy, PartialEq)]
	enum Mark {
		Fresh,
		Open,
		Done,
	}
	let mut mark = vec![Mark::Fresh; n];
	let mut forward = vec![true; edges.len()];
	let starts = (0..n)
		.filter(|&i| indegree[i] == 0)
		.chain(0..n)
		.collect::<Vec<_>>();

	for start in starts {
		if mark[start] != Mark::Fresh {
			continue;
		}
		// (node, next outgoing edge slot)
		let mut stack = vec![(start, 0usize)];
		mark[start] = Mark::Open;
		while let Some(top) = stack.last_mut() {
			let node = top.0;
			if let Some(&edge_idx) = out[node].get(top.1) {
				top.1 += 1;
				let target = edges[edge_idx].1;
				match mark[target] {
					Mark::Open => forward[edge_idx] = false,
					Mark::Fresh => {
						mark[target] = Mark::Open;
						stack.push((target, 0));
					}
					Mark::Done => {}
				}
			} else {
				mark[node] = Mark::Done;
				stack.pop();
			}
		}
	}
	forward
}

/// Rank = length of the longest forward path from any root; isolated nodes sit on rank 0.
fn longest_path_ranks(
	n: usize,
	edges: &[(usize, usize, &ConceptEdge)],
	forward: &[bool],
) -> Vec<usize> {
	let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
	let mut indegree = vec![0usize; n];
	for (edge_idx, &(s, t, _)) in edges.iter().enumerate() {
		if forward[edge_idx] {
			out[s].push(t);
			indegree[t] += 1;
		}
	}

	let mut rank = vec![0usize; n];
	let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
	while let Some(node) = queue.pop_front() {
		for &next in &out[node] {
			rank[next] = rank[next].max(rank[node] + 1);
			indegree[next] -= 1;
			if indegree[next] == 0 {
				queue.push_back(next);
			}
		}
	}
	rank
}

/// Orders each rank to reduce crossings; returns member ids per rank.
fn order_layers(layered: &Layered) -> Vec<Vec<usize>> {
	let rank_count = layered.rank.iter().map(|r| r + 1).max().unwrap_or(0);
	let mut layers: Vec<Vec<usize>> = vec![Vec::new(); rank_count];

	// Initial order: depth-first discovery from rank-0 members.
	let mut seen = vec![false; layered.kind.len()];
	let mut roots: Vec<usize> = (0..layered.kind.len())
		.filter(|&m| layered.rank[m] == 0)
		.collect();
	roots.extend(0..layered.kind.len());
	for root in roots {
		if seen[root] {
			continue;
		}
		let mut stack = vec![root];
		while let Some(member) = stack.pop() {
			if seen[member] {
				continue;
			}
			seen[member] = true;
			layers[layered.rank[member]].push(member);
			for &next in layered.succs[member].iter().rev() {
				if !seen[next] {
					stack.push(next);
				}
			}
		}
	}

	let mut best = layers.clone();
	let mut best_crossings = total_crossings(layered, &layers);
	for iteration in 0..ORDER_ITERATIONS {
		if best_crossings == 0 {
			break;
		}
		if iteration % 2 == 0 {
			for r in 1..layers.len() {
				let (fixed, free) = layers.split_at_mut(r);
				sort_by_barycenter(&mut free[0], &fixed[r - 1], &layered.preds);
			}
		} else {
			for r in (0..layers.len().saturating_sub(1)).rev() {
				let (free, fixed) = layers.split_at_mut(r + 1);
				sort_by_barycenter(&mut free[r], &fixed[0], &layered.succs);
			}
		}
		let crossings = total_crossings(layered, &layers);
		if crossings < best_crossings {
			best_crossings = crossings;
			best = layers.clone();
		}
	}
	best
}

fn sort_by_barycenter(layer: &mut Vec<usize>, reference: &[usize], neighbours: &[Vec<usize>]) {
	let position: HashMap<usize, usize> = reference
		.iter()
		.enumerate()
		.map(|(pos, &m)| (m, pos))
		.collect();
	let mut keyed: Vec<(f64, usize, usize)> = layer
		.iter()
		.enumerate()
		.map(|(current, &member)| {
			let linked: Vec<f64> = neighbours[member]
				.iter()
				.filter_map(|m| position.get(m).map(|&p| p as f64))
				.collect();
			let barycenter = if linked.is_empty() {
				current as f64
			} else {
				linked.iter().sum::<f64>() / linked.len() as f64
			};
			(barycenter, current, member)
		})
		.collect();
	keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
	*layer = keyed.into_iter().map(|(_, _, member)| member).collect();
}

fn total_crossings(layered: &Layered, layers: &[Vec<usize>]) -> usize {
	let mut position = vec![0usize; layered.kind.len()];
	for layer in layers {
		for (pos, &member) in layer.iter().enumerate() {
			position[member] = pos;
		}
	}
	layers
		.iter()
		.map(|layer| {
			let segments: Vec<(usize, usize)> = layer
				.iter()
				.flat_map(|&a| layered.succs[a].iter().map(move |&b| (a, b)))
				.map(|(a, b)| (position[a], position[b]))
				.collect();
			let mut crossings = 0;
			for (i, &(a1, b1)) in segments.iter().enumerate() {
				for &(a2, b2) in &segments[i + 1..] {
					if (a1 < a2 && b1 > b2) || (a1 > a2 && b1 < b2) {
						crossings += 1;
					}
				}
			}
			crossings
		})
		.sum()
}

/// In-rank coordinate for every member (x for top-to-bottom, y for left-to-right).
fn assign_coordinates(layered: &Layered, layers: &[Vec<usize>], direction: Direction) -> Vec<f64> {
	let mut coord = vec![0.0; layered.kind.len()];
	for layer in layers {
		let mut cursor = 0.0;
		for (pos, &member) in layer.iter().enumerate() {
			if pos > 0 {
				cursor += layered.gap(layer[pos - 1], member, direction);
			}
			coord[member] = cursor;
		}
	}

	for pass in 0..PLACEMENT_PASSES {
		let downward = pass % 2 == 0;
		let sequence: Vec<usize> = if downward {
			(1..layers.len()).collect()
		} else {
			(0..layers.len().saturating_sub(1)).rev().collect()
		};
		for r in sequence {
			let layer = &layers[r];
			let desired: Vec<f64> = layer
				.iter()
				.map(|&member| {
					let neighbours = if downward {
						&layered.preds[member]
					} else {
						&layered.succs[member]
					};
					if neighbours.is_empty() {
						coord[member]
					} else {
						neighbours.iter().map(|&m| coord[m]).sum::<f64>() / neighbours.len() as f64
					}
				})
				.collect();
			let gaps: Vec<f64> = layer
				.windows(2)
				.map(|pair| layered.gap(pair[0], pair[1], direction))
				.collect();
			for (&member, value) in layer.iter().zip(project_with_gaps(&desired, &gaps)) {
				coord[member] = value;
			}
		}
	}
	coord
}

/// Closest positions (least squares) to `desired` with `x[i + 1] - x[i] >= gaps[i]`.
///
/// Pool-adjacent-violators on the gap-adjusted values.
fn project_with_gaps(desired: &[f64], gaps: &[f64]) -> Vec<f64> {
	let mut offsets = Vec::with_capacity(desired.len());
	let mut acc = 0.0;
	for i in 0..desired.len() {
		if i > 0 {
			acc += gaps[i - 1];
		}
		offsets.push(acc);
	}

	// (sum, count) per pooled block
	let mut blocks: Vec<(f64, usize)> = Vec::new();
	for (d, o) in desired.iter().zip(&offsets) {
		blocks.push((d - o, 1));
		while blocks.len() >= 2 {
			let (s2, n2) = blocks[blocks.len() - 1];
			let (s1, n1) = blocks[blocks.len() - 2];
			if s1 / n1 as f64 <= s2 / n2 as f64 {
				break;
			}
			blocks.pop();
			let last = blocks.len() - 1;
			blocks[last] = (s1 + s2, n1 + n2);
		}
	}

	blocks
		.into_iter()
		.flat_map(|(sum, count)| std::iter::repeat_n(sum / count as f64, count))
		.zip(offsets)
		.map(|(y, o)| y + o)
		.collect()
}

#[cfg(test)]
mod tests {
	use std::cmp::Ordering;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::concept_graph::data::about_me_graph;

	fn chain(ids: &[&str]) -> (Vec<ConceptNode>, Vec<ConceptEdge>) {
		let nodes = ids.iter().map(|id| ConceptNode::new(*id, *id)).collect();
		let edges = ids
			.windows(2)
			.map(|w| ConceptEdge::between(w[0], w[1], Direction::TopToBottom))
			.collect();
		(nodes, edges)
	}

	fn assert_no_same_rank_overlap(result: &LayoutResult) {
		for (i, a) in result.nodes.iter().enumerate() {
			for b in &result.nodes[i + 1..] {
				if a.rank != b.rank {
					continue;
				}
				let apart_x = a.position.x + a.width <= b.position.x + 1e-6
					|| b.position.x + b.width <= a.position.x + 1e-6;
				let apart_y = a.position.y + a.height <= b.position.y + 1e-6
					|| b.position.y + b.height <= a.position.y + 1e-6;
				assert!(apart_x || apart_y, "{} overlaps {}", a.id, b.id);
			}
		}
	}

	#[test]
	fn about_me_ranks() {
		let graph = about_me_graph(Direction::TopToBottom);
		let result = layout(&graph.nodes, &graph.edges, Direction::TopToBottom);
		assert_eq!(result.rank_of("1"), Some(0));
		for id in ["2", "3", "4", "5"] {
			assert_eq!(result.rank_of(id), Some(1), "node {id}");
		}
		for id in ["6", "7", "8"] {
			assert_eq!(result.rank_of(id), Some(2), "node {id}");
		}
		assert!(result.skipped.is_empty());
	}

	#[test]
	fn about_me_children_sit_under_their_parents() {
		let graph = about_me_graph(Direction::TopToBottom);
		let result = layout(&graph.nodes, &graph.edges, Direction::TopToBottom);
		assert_eq!(result.ranks()[2], vec!["7", "6", "8"]);
		for (parent, child) in [("3", "7"), ("4", "6"), ("5", "8")] {
			let (p, c) = (result.node(parent).unwrap(), result.node(child).unwrap());
			assert!((p.center.x - c.center.x).abs() < 1e-6, "{parent} over {child}");
		}
		let root = result.node("1").unwrap();
		let first = result.node(&result.ranks()[1][0]).unwrap().center.x;
		let last = result.node(&result.ranks()[1][3]).unwrap().center.x;
		assert!((root.center.x - (first + last) / 2.0).abs() < 1e-6);
	}

	#[test]
	fn layout_is_deterministic() {
		let graph = about_me_graph(Direction::TopToBottom);
		let first = layout(&graph.nodes, &graph.edges, Direction::TopToBottom);
		let second = layout(&graph.nodes, &graph.edges, Direction::TopToBottom);
		assert_eq!(first, second);
	}

	#[test]
	fn same_rank_boxes_never_overlap() {
		let graph = about_me_graph(Direction::TopToBottom);
		assert_no_same_rank_overlap(&layout(&graph.nodes, &graph.edges, Direction::TopToBottom));

		let graph = about_me_graph(Direction::LeftToRight);
		assert_no_same_rank_overlap(&layout(&graph.nodes, &graph.edges, Direction::LeftToRight));

		// Wide fan-out where every child wants the same spot.
		let mut nodes = vec![ConceptNode::new("root", "root")];
		let mut edges = Vec::new();
		for i in 0..12 {
			let id = format!("c{i}");
			edges.push(ConceptEdge::between("root", &id, Direction::TopToBottom));
			nodes.push(ConceptNode::new(id, "child"));
		}
		assert_no_same_rank_overlap(&layout(&nodes, &edges, Direction::TopToBottom));
	}

	#[test]
	fn positions_are_top_left_anchored() {
		let graph = about_me_graph(Direction::TopToBottom);
		let result = layout(&graph.nodes, &graph.edges, Direction::TopToBottom);
		for node in &result.nodes {
			assert_eq!(node.position.x, node.center.x - NODE_WIDTH / 2.0);
			assert_eq!(node.position.y, node.center.y - NODE_HEIGHT / 2.0);
			assert!(node.position.x >= -1e-9 && node.position.y >= -1e-9);
		}
		assert_eq!(result.node("1").unwrap().position.y, 0.0);
		assert_eq!(result.node("2").unwrap().position.y, NODE_HEIGHT + RANK_SEP);
	}

	#[test]
	fn left_to_right_resolves_horizontal_sides() {
		let graph = about_me_graph(Direction::LeftToRight);
		let result = layout_strict(&graph.nodes, &graph.edges, Direction::LeftToRight).unwrap();
		for node in &result.nodes {
			assert_eq!(node.target_side, Side::Left);
			assert_eq!(node.source_side, Side::Right);
		}
		let root = result.node("1").unwrap();
		let child = result.node("2").unwrap();
		assert!(child.position.x > root.position.x + root.width);
		let edge = result.edges.iter().find(|e| e.id == "e1-2").unwrap();
		assert_eq!(edge.start, root.anchor(Side::Right));
		assert_eq!(edge.end, child.anchor(Side::Left));
	}

	#[test]
	fn edge_anchors_sit_on_box_sides() {
		let graph = about_me_graph(Direction::TopToBottom);
		let result = layout(&graph.nodes, &graph.edges, Direction::TopToBottom);
		assert_eq!(result.edges.len(), 7);
		for edge in &result.edges {
			let source = result.node(&edge.source).unwrap();
			let target = result.node(&edge.target).unwrap();
			assert_eq!(edge.start.y, source.position.y + source.height);
			assert_eq!(edge.end.y, target.position.y);
			assert!(edge.bends.is_empty());
		}
	}

	#[test]
	fn dangling_edge_is_skipped_or_rejected() {
		let (nodes, mut edges) = chain(&["a", "b"]);
		edges.push(ConceptEdge::between("b", "ghost", Direction::TopToBottom));

		let result = layout(&nodes, &edges, Direction::TopToBottom);
		assert_eq!(result.skipped, vec!["eb-ghost".to_string()]);
		assert_eq!(result.edges.len(), 1);

		let err = layout_strict(&nodes, &edges, Direction::TopToBottom).unwrap_err();
		assert_eq!(
			err,
			LayoutError::DanglingEdge {
				edge: "eb-ghost".into(),
				missing: "ghost".into()
			}
		);
	}

	#[test]
	fn strict_rejects_duplicates_and_misoriented_handles() {
		let (mut nodes, edges) = chain(&["a", "b"]);
		nodes.push(ConceptNode::new("a", "again"));
		assert_eq!(
			layout_strict(&nodes, &edges, Direction::TopToBottom),
			Err(LayoutError::DuplicateNode("a".into()))
		);
		nodes.pop();
		assert!(matches!(
			layout_strict(&nodes, &edges, Direction::LeftToRight),
			Err(LayoutError::HandleMismatch { .. })
		));
		// Tolerant mode keeps the first definition and still lays out.
		nodes.push(ConceptNode::new("a", "again"));
		let result = layout(&nodes, &edges, Direction::TopToBottom);
		assert_eq!(result.nodes.len(), 2);
		assert_eq!(result.node("a").unwrap().label, "a");
	}

	#[test]
	fn disconnected_and_multi_root_graphs() {
		let (mut nodes, mut edges) = chain(&["a", "b", "c"]);
		nodes.push(ConceptNode::new("lonely", "lonely"));
		nodes.push(ConceptNode::new("x", "x"));
		edges.push(ConceptEdge::between("x", "c", Direction::TopToBottom));

		let result = layout(&nodes, &edges, Direction::TopToBottom);
		assert_eq!(result.rank_of("lonely"), Some(0));
		assert_eq!(result.rank_of("x"), Some(0));
		assert_eq!(result.rank_of("c"), Some(2));
		assert_no_same_rank_overlap(&result);
		// x -> c skips rank 1 and bends through one virtual node.
		let long = result.edges.iter().find(|e| e.id == "ex-c").unwrap();
		assert_eq!(long.bends.len(), 1);
	}

	#[test]
	fn cycles_are_tolerated() {
		let (nodes, mut edges) = chain(&["a", "b", "c"]);
		edges.push(ConceptEdge::between("c", "a", Direction::TopToBottom));
		edges.push(ConceptEdge::between("b", "b", Direction::TopToBottom));
		let result = layout(&nodes, &edges, Direction::TopToBottom);
		assert_eq!(result.rank_of("a"), Some(0));
		assert_eq!(result.rank_of("b"), Some(1));
		assert_eq!(result.rank_of("c"), Some(2));
		assert_eq!(result.edges.len(), 4);
	}

	#[test]
	fn barycenter_untangles_crossed_children() {
		let direction = Direction::TopToBottom;
		let nodes: Vec<ConceptNode> = ["p", "q", "x", "y"]
			.iter()
			.map(|id| ConceptNode::new(*id, *id))
			.collect();
		// Discovery order puts the shared child x left of y, crossing q -> x with p -> y.
		let edges = vec![
			ConceptEdge::between("p", "x", direction),
			ConceptEdge::between("p", "y", direction),
			ConceptEdge::between("q", "x", direction),
		];
		let result = layout(&nodes, &edges, direction);
		let ranks = result.ranks();
		assert_eq!(ranks[0], vec!["p", "q"]);
		assert_eq!(ranks[1], vec!["y", "x"]);
		assert_eq!(total_edge_crossings(&result), 0);
	}

	fn total_edge_crossings(result: &LayoutResult) -> usize {
		let mut crossings = 0;
		for (i, a) in result.edges.iter().enumerate() {
			for b in &result.edges[i + 1..] {
				// Edges sharing an endpoint never cross.
				let top = a.start.x.partial_cmp(&b.start.x);
				let bottom = a.end.x.partial_cmp(&b.end.x);
				match (top, bottom) {
					(Some(Ordering::Equal), _) | (_, Some(Ordering::Equal)) => {}
					(Some(up), Some(down)) if up != down => crossings += 1,
					_ => {}
				}
			}
		}
		crossings
	}

	#[test]
	fn shared_endpoints_are_not_crossings() {
		let direction = Direction::TopToBottom;
		let nodes: Vec<ConceptNode> = ["p", "x", "y"]
			.iter()
			.map(|id| ConceptNode::new(*id, *id))
			.collect();
		let edges = vec![
			ConceptEdge::between("p", "x", direction),
			ConceptEdge::between("p", "y", direction),
		];
		assert_eq!(total_edge_crossings(&layout(&nodes, &edges, direction)), 0);
	}

	#[test]
	fn projection_respects_gaps() {
		let placed = project_with_gaps(&[0.0, 0.0, 0.0], &[10.0, 10.0]);
		assert_eq!(placed, vec![-10.0, 0.0, 10.0]);
		let placed = project_with_gaps(&[0.0, 100.0], &[10.0]);
		assert_eq!(placed, vec![0.0, 100.0]);
	}

	#[test]
	fn empty_graph_lays_out_to_nothing() {
		let result = layout(&[], &[], Direction::TopToBottom);
		assert!(result.nodes.is_empty());
		assert_eq!(result.bounds, Bounds::default());
	}
}
