mod component;
mod state;

pub use component::DetailOverlay;
pub use state::{FetchTicket, OverlayPhase, OverlayState};
