//! Read path to the external content store (biography paragraphs and projects).

mod client;
mod types;

pub use client::{ContentClient, ContentError};
pub use types::{Paragraph, Project};
