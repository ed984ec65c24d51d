pub mod about;
pub mod contact;
pub mod not_found;
pub mod paragraphs;
pub mod projects;
