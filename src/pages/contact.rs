use leptos::prelude::*;

use crate::components::contact::ContactForm;

#[component]
pub fn Contact() -> impl IntoView {
	view! {
		<div class="contact-page">
			<ContactForm />
		</div>
	}
}
