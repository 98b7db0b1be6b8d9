//! Rate limiting middleware using token bucket algorithm.

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Per-client-IP key extractor.
///
/// Uses the socket peer address by default, which cannot be spoofed. When the
/// service runs behind a trusted reverse proxy, the forwarding headers
/// (`X-Forwarded-For`, `X-Real-IP`, `Forwarded`) are consulted first.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

type ClientIpGovernorLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for public endpoints.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer(behind_proxy: bool) -> ClientIpGovernorLayer {
    build(behind_proxy, 2, 100)
}

/// Creates a stricter rate limiter for credential endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Used for registration and login to slow down password guessing.
pub fn secure_layer(behind_proxy: bool) -> ClientIpGovernorLayer {
    build(behind_proxy, 1, 10)
}

fn build(behind_proxy: bool, per_second: u64, burst_size: u32) -> ClientIpGovernorLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .key_extractor(ClientIpKeyExtractor::new(behind_proxy))
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_mode_reads_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7")
            .body(())
            .unwrap();

        let key = ClientIpKeyExtractor::new(true).extract(&req).unwrap();
        assert_eq!(key, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_direct_mode_ignores_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7")
            .body(())
            .unwrap();

        // No ConnectInfo on the request, so the peer address is unavailable.
        assert!(ClientIpKeyExtractor::new(false).extract(&req).is_err());
    }
}
