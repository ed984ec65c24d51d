use super::types::{ConceptEdge, ConceptGraph, ConceptNode, Direction};

const NODES: &[(&str, &str)] = &[
	("1", "About Me"),
	("2", "Aspiration"),
	("3", "Perseverance"),
	("4", "Culture"),
	("5", "University Life"),
	("6", "Came From"),
	("7", "Immigration"),
	("8", "Education"),
];

const EDGES: &[(&str, &str)] = &[
	("1", "2"),
	("1", "3"),
	("1", "4"),
	("1", "5"),
	("4", "6"),
	("3", "7"),
	("5", "8"),
];

/// The About-Me concept graph, with handles oriented for `direction`.
pub fn about_me_graph(direction: Direction) -> ConceptGraph {
	ConceptGraph {
		nodes: NODES
			.iter()
			.map(|&(id, label)| ConceptNode::new(id, label))
			.collect(),
		edges: EDGES
			.iter()
			.map(|&(source, target)| ConceptEdge::between(source, target, direction))
			.collect(),
	}
}
