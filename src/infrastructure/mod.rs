//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - Process-local repository implementations
//! - [`security`] - Password hashing and session tokens
//! - [`storage`] - Backend selection and lifecycle

pub mod memory;
pub mod persistence;
pub mod security;
pub mod storage;

pub use storage::Storage;
