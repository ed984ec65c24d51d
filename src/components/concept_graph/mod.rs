mod component;
pub mod data;
pub mod layout;
mod render;
mod state;
pub mod types;

pub use component::ConceptGraphCanvas;
pub use layout::{LayoutError, LayoutResult, layout, layout_strict};
pub use types::{ConceptEdge, ConceptGraph, ConceptNode, Direction, Side};
