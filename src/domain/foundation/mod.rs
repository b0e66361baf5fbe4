//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types used by every feature
//! list of the admin dashboard.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, FormErrors, ValidationError};
pub use ids::EntityId;
pub use timestamp::Timestamp;
