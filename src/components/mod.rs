//! Reusable UI pieces.

pub mod about_graph;
pub mod concept_graph;
pub mod contact;
pub mod detail_overlay;
pub mod effects;
pub mod navbar;
pub mod project_card;
