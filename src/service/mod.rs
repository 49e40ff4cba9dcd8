//! Boundary checks and password hashing used by the handlers.

mod password;
mod validation;
pub use password::{hash_password, verify_password};
pub use validation::{optional_text, required_id, required_text};
