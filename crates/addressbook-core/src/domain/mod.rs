pub mod contact;
pub mod contact_id;

pub use contact::{Contact, ContactDraft, ContactNew};
pub use contact_id::ContactId;
