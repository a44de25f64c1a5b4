//! Per-IP rate limiting for public write endpoints.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type IpGovernorLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn build(per_second: u64, burst_size: u32) -> IpGovernorLayer {
    let config = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
        .expect("rate limit period and burst are non-zero");

    GovernorLayer::new(Arc::new(config))
}

/// Limiter for click tracking: one token every second, burst of 60.
///
/// A profile page with many links can fire a quick series of clicks.
/// Requires the server to be started with `into_make_service_with_connect_info`.
pub fn clicks_layer() -> IpGovernorLayer {
    build(1, 60)
}

/// Stricter limiter for signup and slug checks: one token every 5 seconds,
/// burst of 10.
pub fn signup_layer() -> IpGovernorLayer {
    build(5, 10)
}
