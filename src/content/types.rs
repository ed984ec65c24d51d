use serde::{Deserialize, Serialize};

/// One biography paragraph attached to a concept node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
	pub para_id: i64,
	pub para_text: String,
	pub node_id: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub node_title: Option<String>,
}

/// A portfolio project card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
	pub pro_id: i64,
	pub pro_title: String,
	#[serde(default)]
	pub pro_image: String,
	#[serde(default)]
	pub pro_description: String,
	#[serde(default)]
	pub pro_link: String,
}
