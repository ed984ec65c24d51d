mod form;
mod validation;

pub use form::ContactForm;
pub use validation::{ContactError, ContactMessage};
