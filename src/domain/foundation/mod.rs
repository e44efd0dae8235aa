//! Foundation module - Shared domain primitives.
//!
//! Contains the validation error vocabulary used by domain
//! value objects and by inbound request validation.

mod errors;

pub use errors::ValidationError;
