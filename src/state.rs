//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, DomainService, LinkService, RedirectService};
use crate::config::Config;
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::infrastructure::Storage;

/// Tunables for the services built into [`AppState`].
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub auth_token_secret: String,
    pub auth_token_ttl_hours: u64,
    pub cookie_secure: bool,
    pub slug_generation_attempts: usize,
    pub resolve_retry_attempts: usize,
}

impl From<&Config> for ServiceOptions {
    fn from(config: &Config) -> Self {
        Self {
            auth_token_secret: config.auth_token_secret.clone(),
            auth_token_ttl_hours: config.auth_token_ttl_hours,
            cookie_secure: config.cookie_secure,
            slug_generation_attempts: config.slug_generation_attempts,
            resolve_retry_attempts: config.resolve_retry_attempts,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub link_service: Arc<LinkService<dyn LinkRepository, dyn UserRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub domain_service: Arc<DomainService<dyn UserRepository>>,
    /// Adds the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
}

impl AppState {
    /// Wires services onto the repositories of `storage`.
    pub fn new(storage: Storage, options: &ServiceOptions) -> Self {
        let links = storage.links();
        let users = storage.users();

        Self {
            link_service: Arc::new(LinkService::new(
                links.clone(),
                users.clone(),
                options.slug_generation_attempts,
            )),
            redirect_service: Arc::new(RedirectService::new(
                links,
                options.resolve_retry_attempts,
            )),
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                &options.auth_token_secret,
                options.auth_token_ttl_hours,
            )),
            domain_service: Arc::new(DomainService::new(users)),
            cookie_secure: options.cookie_secure,
            storage,
        }
    }
}
