pub mod duplicate;
pub mod validation;

pub use duplicate::{find_duplicate, is_duplicate, NameKey};
pub use validation::{normalize_first_name, normalize_surname};
