//! Core domain entities.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! `New*` structs because ids, counters and timestamps are assigned by storage.
//!
//! - [`Link`] - A short slug mapped to a destination URL with a click counter
//! - [`User`] - An account owning links and domains

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{NewUser, User};
