//! Session-scoped, in-memory storage for chat transcripts and run step logs.
//!
//! State is keyed by [`SessionKey`] and lives only as long as the owning
//! [`SessionStore`]. Nothing here touches the filesystem.

mod key;
mod message;
mod store;

pub use key::{SessionKey, DEFAULT_SESSION_KEY};
pub use message::{Message, Role};
pub use store::SessionStore;
