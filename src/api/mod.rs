//! HTTP layer: link management, redirects and accounts over JSON.
//!
//! Handlers stay thin. They extract input, call an application service and
//! map the result; every failure leaves as an [`crate::error::AppError`]
//! response.
//!
//! - [`dto`] - request/response bodies
//! - [`handlers`] - one module per endpoint group
//! - [`middleware`] - session authentication, rate limiting, tracing
//! - [`routes`] - route groups, assembled in [`crate::routes`]

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
