//! Rate limiting middleware using token bucket algorithm.

use axum::body::Body;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Public endpoint limits: 2 requests per second, burst of 100.
const PUBLIC_PER_SECOND: u64 = 2;
const PUBLIC_BURST: u32 = 100;

/// Authenticated endpoint limits: 1 request per second, burst of 10.
const SECURE_PER_SECOND: u64 = 1;
const SECURE_BURST: u32 = 10;

/// Rate limiter for public endpoints, keyed by socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PUBLIC_PER_SECOND)
            .burst_size(PUBLIC_BURST)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Public-endpoint limiter for proxied deployments.
///
/// Keys on the client IP taken from `X-Forwarded-For` / `X-Real-IP` /
/// `Forwarded` headers. Use only behind a trusted reverse proxy; anywhere
/// else the headers are client-controlled.
pub fn proxied_layer() -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PUBLIC_PER_SECOND)
            .burst_size(PUBLIC_BURST)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Stricter rate limiter for authenticated endpoints.
pub fn secure_layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(SECURE_PER_SECOND)
            .burst_size(SECURE_BURST)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Authenticated-endpoint limiter for proxied deployments.
pub fn proxied_secure_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(SECURE_PER_SECOND)
            .burst_size(SECURE_BURST)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
