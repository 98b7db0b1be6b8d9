//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by both storage backends in the infrastructure layer. Mock
//! implementations are generated via `mockall` for service unit tests.
//!
//! - [`LinkRepository`] - Link registry and atomic click accounting
//! - [`UserRepository`] - Accounts and domain ownership

pub mod link_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
