//! Business logic services for the application layer.

pub mod auth_service;
pub mod domain_service;
pub mod link_service;
pub mod redirect_service;

pub use auth_service::{AuthService, Registration, Session};
pub use domain_service::DomainService;
pub use link_service::{CreateLink, LinkService};
pub use redirect_service::RedirectService;
