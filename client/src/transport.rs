use bytes::Bytes;
use cache::RequestOptions;

/// Sends one request to the origin. Caching is layered on top by
/// [`crate::CachedClient`]; a transport never caches by itself.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: RequestOptions,
    ) -> impl Future<Output = Result<http::Response<Bytes>, TransportError>> + Send;
}

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("invalid request :: {0}")]
    InvalidRequest(String),

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}
