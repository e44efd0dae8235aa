//! Session domain module.
//!
//! A session holds the ordered context window of one conversation,
//! keyed by a caller-supplied session key. Sessions are created on
//! first reference and mutated only by guarded message appends.

mod message;
mod session;

pub use message::{Message, Role};
pub use session::{Session, SessionKey, UserKey};
