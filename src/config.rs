//! Site settings, fixed at build time.
//!
//! Values come from the environment of the `trunk build` / `cargo build`
//! invocation; anything unset or unparsable falls back to the default.

use std::time::Duration;

use log::warn;

use crate::components::concept_graph::Direction;

/// Base URL of the content store. Empty means same origin.
pub const DEFAULT_API_BASE: &str = "";
pub const DEFAULT_STAR_COUNT: usize = 20;
pub const DEFAULT_STRIP_RESTART_DELAY: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
	pub api_base: String,
	pub direction: Direction,
	pub star_count: usize,
	pub strip_restart_delay: Duration,
	/// Recipient for the contact form; without one the form cannot send.
	pub contact_email: Option<String>,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			api_base: DEFAULT_API_BASE.to_string(),
			direction: Direction::TopToBottom,
			star_count: DEFAULT_STAR_COUNT,
			strip_restart_delay: DEFAULT_STRIP_RESTART_DELAY,
			contact_email: None,
		}
	}
}

impl SiteConfig {
	pub fn from_env() -> Self {
		let mut config = Self::from_values(
			option_env!("PORTFOLIO_API_BASE"),
			option_env!("PORTFOLIO_GRAPH_DIRECTION"),
			option_env!("PORTFOLIO_STAR_COUNT"),
		);
		config.contact_email = option_env!("PORTFOLIO_CONTACT_EMAIL")
			.map(str::trim)
			.filter(|address| !address.is_empty())
			.map(str::to_string);
		config
	}

	fn from_values(api_base: Option<&str>, direction: Option<&str>, stars: Option<&str>) -> Self {
		let mut config = Self::default();
		if let Some(base) = api_base {
			config.api_base = base.trim().to_string();
		}
		if let Some(raw) = direction {
			match Direction::parse(raw) {
				Some(direction) => config.direction = direction,
				None => warn!("ignoring unknown graph direction {raw:?}"),
			}
		}
		if let Some(raw) = stars {
			match raw.trim().parse() {
				Ok(count) => config.star_count = count,
				Err(e) => warn!("ignoring star count {raw:?}: {e}"),
			}
		}
		config
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_without_environment() {
		assert_eq!(SiteConfig::from_values(None, None, None), SiteConfig::default());
	}

	#[test]
	fn values_override_defaults() {
		let config =
			SiteConfig::from_values(Some(" http://localhost:3000 "), Some("LR"), Some("50"));
		assert_eq!(config.api_base, "http://localhost:3000");
		assert_eq!(config.direction, Direction::LeftToRight);
		assert_eq!(config.star_count, 50);
	}

	#[test]
	fn bad_values_fall_back() {
		let config = SiteConfig::from_values(None, Some("sideways"), Some("many"));
		assert_eq!(config.direction, Direction::TopToBottom);
		assert_eq!(config.star_count, DEFAULT_STAR_COUNT);
	}
}
