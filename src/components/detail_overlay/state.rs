use log::{debug, warn};

use crate::content::{ContentError, Paragraph};

/// Identifies one detail fetch. A result is only committed while its ticket
/// is still the overlay's current one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
	pub node_id: String,
	generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OverlayPhase {
	#[default]
	Closed,
	/// Visible, waiting for the fetch to resolve. Shows no paragraphs.
	Loading { node_id: String },
	Loaded {
		node_id: String,
		records: Vec<Paragraph>,
	},
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayState {
	phase: OverlayPhase,
	generation: u64,
}

impl OverlayState {
	pub fn phase(&self) -> &OverlayPhase {
		&self.phase
	}

	pub fn is_open(&self) -> bool {
		!matches!(self.phase, OverlayPhase::Closed)
	}

	pub fn is_loading(&self) -> bool {
		matches!(self.phase, OverlayPhase::Loading { .. })
	}

	pub fn open_node(&self) -> Option<&str> {
		match &self.phase {
			OverlayPhase::Closed => None,
			OverlayPhase::Loading { node_id } | OverlayPhase::Loaded { node_id, .. } => {
				Some(node_id.as_str())
			}
		}
	}

	pub fn records(&self) -> &[Paragraph] {
		match &self.phase {
			OverlayPhase::Loaded { records, .. } => records,
			_ => &[],
		}
	}

	/// Opens (or re-opens) the overlay on `node_id`, superseding any pending fetch.
	pub fn open(&mut self, node_id: &str) -> FetchTicket {
		self.generation += 1;
		self.phase = OverlayPhase::Loading {
			node_id: node_id.to_string(),
		};
		FetchTicket {
			node_id: node_id.to_string(),
			generation: self.generation,
		}
	}

	/// Node click: closes when `node_id` is already open, otherwise opens it.
	pub fn toggle(&mut self, node_id: &str) -> Option<FetchTicket> {
		if self.open_node() == Some(node_id) {
			self.close();
			None
		} else {
			Some(self.open(node_id))
		}
	}

	pub fn close(&mut self) {
		self.generation += 1;
		self.phase = OverlayPhase::Closed;
	}

	/// Commits a fetch result. Returns false when the ticket is stale and the
	/// result was dropped.
	///
	/// A failed fetch is logged and leaves the overlay open with no paragraphs.
	pub fn resolve(
		&mut self,
		ticket: &FetchTicket,
		result: Result<Vec<Paragraph>, ContentError>,
	) -> bool {
		let current = ticket.generation == self.generation
			&& matches!(&self.phase, OverlayPhase::Loading { node_id } if *node_id == ticket.node_id);
		if !current {
			debug!(
				"discarding stale detail response for node {} (open: {:?})",
				ticket.node_id,
				self.open_node()
			);
			return false;
		}

		let records = match result {
			Ok(records) => records,
			Err(e) => {
				warn!("error fetching details for node {}: {e}", ticket.node_id);
				Vec::new()
			}
		};
		self.phase = OverlayPhase::Loaded {
			node_id: ticket.node_id.clone(),
			records,
		};
		true
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn para(id: i64, node: i64, text: &str) -> Paragraph {
		Paragraph {
			para_id: id,
			para_text: text.into(),
			node_id: node,
			node_title: None,
		}
	}

	#[test]
	fn click_opens_loading_immediately() {
		let mut overlay = OverlayState::default();
		let ticket = overlay.toggle("3").unwrap();
		assert!(overlay.is_open());
		assert!(overlay.is_loading());
		assert_eq!(overlay.open_node(), Some("3"));
		assert!(overlay.records().is_empty());
		assert_eq!(ticket.node_id, "3");
	}

	#[test]
	fn loaded_paragraphs_keep_their_order() {
		let mut overlay = OverlayState::default();
		let ticket = overlay.open("1");
		assert!(overlay.resolve(&ticket, Ok(vec![para(1, 1, "Hello"), para(2, 1, "World")])));
		let texts: Vec<&str> = overlay.records().iter().map(|p| p.para_text.as_str()).collect();
		assert_eq!(texts, vec!["Hello", "World"]);
		assert!(!overlay.is_loading());
	}

	#[test]
	fn superseded_response_is_discarded() {
		let mut overlay = OverlayState::default();
		let x = overlay.toggle("2").unwrap();
		let y = overlay.toggle("5").unwrap();

		assert!(!overlay.resolve(&x, Ok(vec![para(4, 2, "from x")])));
		assert_eq!(
			overlay.phase(),
			&OverlayPhase::Loading {
				node_id: "5".into()
			}
		);

		assert!(overlay.resolve(&y, Ok(vec![para(13, 5, "from y")])));
		assert_eq!(overlay.records()[0].para_text, "from y");

		// A late x result can no longer touch the loaded y content either.
		assert!(!overlay.resolve(&x, Ok(vec![para(4, 2, "from x")])));
		assert_eq!(overlay.open_node(), Some("5"));
		assert_eq!(overlay.records()[0].para_text, "from y");
	}

	#[test]
	fn reopening_the_same_node_ignores_the_earlier_fetch() {
		let mut overlay = OverlayState::default();
		let first = overlay.toggle("4").unwrap();
		assert_eq!(overlay.toggle("4"), None);
		let second = overlay.toggle("4").unwrap();

		assert!(!overlay.resolve(&first, Ok(vec![para(1, 4, "old")])));
		assert!(overlay.is_loading());
		assert!(overlay.resolve(&second, Ok(vec![para(1, 4, "new")])));
		assert_eq!(overlay.records()[0].para_text, "new");
	}

	#[test]
	fn clicking_the_open_node_closes() {
		let mut overlay = OverlayState::default();
		let ticket = overlay.toggle("6").unwrap();
		overlay.resolve(&ticket, Ok(vec![para(16, 6, "text")]));
		assert_eq!(overlay.toggle("6"), None);
		assert!(!overlay.is_open());
		assert_eq!(overlay.phase(), &OverlayPhase::Closed);
	}

	#[test]
	fn clicks_on_the_graph_switch_then_close_the_panel() {
		let mut overlay = OverlayState::default();
		let x = overlay.toggle("2").unwrap();
		overlay.resolve(&x, Ok(vec![para(4, 2, "x")]));

		// Another node while X is shown switches straight to it.
		let y = overlay.toggle("3").unwrap();
		assert_eq!(
			overlay.phase(),
			&OverlayPhase::Loading {
				node_id: "3".into()
			}
		);
		assert!(overlay.resolve(&y, Ok(vec![para(7, 3, "y")])));

		// The open node again closes it.
		assert_eq!(overlay.toggle("3"), None);
		assert_eq!(overlay.phase(), &OverlayPhase::Closed);
	}

	#[test]
	fn close_while_loading_drops_the_result() {
		let mut overlay = OverlayState::default();
		let ticket = overlay.toggle("7").unwrap();
		overlay.close();
		assert!(!overlay.resolve(&ticket, Ok(vec![para(19, 7, "late")])));
		assert!(!overlay.is_open());
	}

	#[test]
	fn failed_fetch_leaves_overlay_open_and_empty() {
		let mut overlay = OverlayState::default();
		let ticket = overlay.toggle("8").unwrap();
		assert!(overlay.resolve(&ticket, Err(ContentError::Status(500))));
		assert!(overlay.is_open());
		assert_eq!(overlay.open_node(), Some("8"));
		assert!(overlay.records().is_empty());
	}
}
