use std::time::Duration;

/// Defaults for requests that don't say otherwise in their [`cache::CacheOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Time to live when the response carries no usable `Cache-Control`.
    pub ttl: Duration,
    /// Derive the time to live from `Cache-Control` when present.
    pub interpret_header: bool,
    /// Serve an expired entry when the origin fails.
    pub stale_if_error: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            interpret_header: true,
            stale_if_error: true,
        }
    }
}
