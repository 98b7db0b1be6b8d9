//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide the operations HTTP handlers
//! and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link registry: create, list, delete
//! - [`services::redirect_service::RedirectService`] - Slug resolution and click accounting
//! - [`services::auth_service::AuthService`] - Registration, login, session verification
//! - [`services::domain_service::DomainService`] - Domain ownership

pub mod services;
