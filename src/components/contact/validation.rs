use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static EMAIL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Empty is allowed: the LinkedIn field is optional.
static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(https://www\.linkedin\.com/in/[a-z0-9_-]+/?)?$").expect("linkedin pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactError {
	#[error("Please enter your name.")]
	MissingName,
	#[error("Please enter a valid email address.")]
	InvalidEmail,
	#[error("Please enter a valid LinkedIn URL.")]
	InvalidLinkedIn,
	#[error("Please enter a message.")]
	MissingMessage,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactMessage {
	pub name: String,
	pub email: String,
	pub linkedin: String,
	pub message: String,
}

impl ContactMessage {
	/// Checks the fields in form order and reports the first problem.
	pub fn validate(&self) -> Result<(), ContactError> {
		if self.name.trim().is_empty() {
			return Err(ContactError::MissingName);
		}
		if !EMAIL.is_match(&self.email.trim().to_lowercase()) {
			return Err(ContactError::InvalidEmail);
		}
		if !LINKEDIN.is_match(&self.linkedin.trim().to_lowercase()) {
			return Err(ContactError::InvalidLinkedIn);
		}
		if self.message.trim().is_empty() {
			return Err(ContactError::MissingMessage);
		}
		Ok(())
	}

	/// `mailto:` link carrying the message, with `encode` percent-encoding each component.
	pub fn mailto(&self, recipient: &str, encode: impl Fn(&str) -> String) -> String {
		let subject = format!("Portfolio contact from {}", self.name.trim());
		let mut body = format!(
			"{}\n\nFrom: {} <{}>",
			self.message.trim(),
			self.name.trim(),
			self.email.trim()
		);
		if !self.linkedin.trim().is_empty() {
			body.push_str(&format!("\nLinkedIn: {}", self.linkedin.trim()));
		}
		format!(
			"mailto:{}?subject={}&body={}",
			recipient,
			encode(&subject),
			encode(&body)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn filled() -> ContactMessage {
		ContactMessage {
			name: "Ada".into(),
			email: "ada@example.com".into(),
			linkedin: String::new(),
			message: "Hello there".into(),
		}
	}

	#[test]
	fn complete_form_is_valid() {
		assert_eq!(filled().validate(), Ok(()));
		let with_profile = ContactMessage {
			linkedin: "https://www.linkedin.com/in/Ada-Lovelace_1/".into(),
			..filled()
		};
		assert_eq!(with_profile.validate(), Ok(()));
	}

	#[test]
	fn first_problem_wins() {
		let empty = ContactMessage::default();
		assert_eq!(empty.validate(), Err(ContactError::MissingName));
		let bad_email = ContactMessage {
			email: "not an email".into(),
			message: String::new(),
			..filled()
		};
		assert_eq!(bad_email.validate(), Err(ContactError::InvalidEmail));
	}

	#[test]
	fn rejects_foreign_profile_links() {
		let message = ContactMessage {
			linkedin: "https://example.com/in/ada".into(),
			..filled()
		};
		assert_eq!(message.validate(), Err(ContactError::InvalidLinkedIn));
	}

	#[test]
	fn blank_message_is_rejected() {
		let message = ContactMessage {
			message: "   ".into(),
			..filled()
		};
		assert_eq!(message.validate(), Err(ContactError::MissingMessage));
		assert_eq!(
			ContactError::MissingMessage.to_string(),
			"Please enter a message."
		);
	}

	#[test]
	fn mailto_encodes_subject_and_body() {
		let link = filled().mailto("me@example.com", |s| s.replace(' ', "%20").replace('\n', "%0A"));
		assert_eq!(
			link,
			"mailto:me@example.com?subject=Portfolio%20contact%20from%20Ada\
			 &body=Hello%20there%0A%0AFrom:%20Ada%20<ada@example.com>"
		);
	}
}
