//! Purely decorative page effects.

mod starfield;
mod strip;

pub use starfield::{Star, Starfield, generate_stars};
pub use strip::Strip;
