//! Upstream access: request descriptors, transport, and the rate gate.

pub mod gate;
pub mod request;
pub mod transport;

pub use gate::{RateGate, RateGateConfig};
pub use request::UpstreamRequest;
pub use transport::{HttpTransport, TOO_MANY_REQUESTS, Transport, UpstreamResponse};

/// Default base URL of the Jikan v4 API.
pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";
