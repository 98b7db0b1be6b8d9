//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented in
//! [`crate::infrastructure`]; business rules live in
//! [`crate::application::services`].
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod repositories;
