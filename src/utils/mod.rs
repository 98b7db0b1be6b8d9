//! Helpers for slug handling and input validation.
//!
//! - [`slug`] - Random slug generation and custom slug validation
//! - [`url_validator`] - Destination URL validation
//! - [`domain_name`] - Business domain name validation

pub mod domain_name;
pub mod slug;
pub mod url_validator;
