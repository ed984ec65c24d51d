use leptos::ev;
use leptos::prelude::*;
use log::{info, warn};

use super::validation::ContactMessage;
use crate::config::SiteConfig;

pub const LINKEDIN_PROFILE: &str = "https://www.linkedin.com/in/yan-chen-8a7a50211";
pub const GITHUB_PROFILE: &str = "https://github.com/Sparerow1";

#[derive(Clone, Debug, PartialEq)]
enum Status {
	Idle,
	Invalid(String),
	Handoff,
	Unavailable,
}

/// Contact form. A valid message is handed to the visitor's mail client.
#[component]
pub fn ContactForm() -> impl IntoView {
	let recipient = use_context::<SiteConfig>().and_then(|config| config.contact_email);

	let name = RwSignal::new(String::new());
	let email = RwSignal::new(String::new());
	let linkedin = RwSignal::new(String::new());
	let message = RwSignal::new(String::new());
	let status = RwSignal::new(Status::Idle);

	let on_submit = move |evt: ev::SubmitEvent| {
		evt.prevent_default();
		let draft = ContactMessage {
			name: name.get_untracked(),
			email: email.get_untracked(),
			linkedin: linkedin.get_untracked(),
			message: message.get_untracked(),
		};
		if let Err(e) = draft.validate() {
			status.set(Status::Invalid(e.to_string()));
			return;
		}
		let Some(recipient) = recipient.as_deref() else {
			warn!("contact form submitted but no contact address is configured");
			status.set(Status::Unavailable);
			return;
		};
		let link = draft.mailto(recipient, |part| {
			String::from(js_sys::encode_uri_component(part))
		});
		let opened = web_sys::window().map(|window| window.location().set_href(&link));
		match opened {
			Some(Ok(())) => {
				info!("contact message handed to mail client");
				status.set(Status::Handoff);
			}
			_ => {
				warn!("could not open mail client for contact message");
				status.set(Status::Unavailable);
			}
		}
	};

	let status_line = move || match status.get() {
		Status::Idle => None,
		Status::Invalid(reason) => Some(view! { <p class="form-error">{reason}</p> }.into_any()),
		Status::Handoff => {
			Some(view! { <p class="form-ok">"Opening your mail client…"</p> }.into_any())
		}
		Status::Unavailable => Some(
			view! {
				<p class="form-error">
					"Messages can't be sent from here right now. Please reach out on LinkedIn."
				</p>
			}
			.into_any(),
		),
	};

	view! {
		<div class="contact">
			<div class="contact-links">
				<a href=LINKEDIN_PROFILE target="_blank" rel="noopener">
					<img class="logo" width="90" height="90" src="/linkedin.svg" alt="LinkedIn" />
				</a>
				<a href=GITHUB_PROFILE target="_blank" rel="noopener">
					<img class="logo" width="90" height="90" src="/github.svg" alt="GitHub" />
				</a>
			</div>
			<h1 class="title">"Contact Me"</h1>
			<fieldset class="fieldset">
				<form on:submit=on_submit>
					<label class="label">
						"Name: *"
						<input
							type="text"
							class="input"
							name="from_name"
							prop:value=name
							on:input=move |evt| name.set(event_target_value(&evt))
						/>
						"Email: *"
						<input
							type="email"
							class="input"
							name="email_address"
							prop:value=email
							on:input=move |evt| email.set(event_target_value(&evt))
						/>
						"LinkedIn (optional):"
						<input
							type="text"
							class="input"
							name="linkedin"
							prop:value=linkedin
							on:input=move |evt| linkedin.set(event_target_value(&evt))
						/>
						"Message: *"
						<textarea
							class="message"
							name="message"
							prop:value=message
							on:input=move |evt| message.set(event_target_value(&evt))
						></textarea>
					</label>
					<button type="submit" class="submit-button">"Submit"</button>
				</form>
			</fieldset>
			{status_line}
		</div>
	}
}
