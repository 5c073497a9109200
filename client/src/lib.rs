mod cache_control;
mod client;
mod config;
mod error;
mod mutator;
mod response;
mod transport;

#[cfg(feature = "reqwest")]
mod reqwest_transport;

pub use client::{CachedClient, CachedResponse};
pub use config::ClientConfig;
pub use error::ClientError;
pub use mutator::{MutatorError, mutator};
pub use response::Response;
pub use transport::{Transport, TransportError};

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

pub use cache::{
    BaseConfig, CacheHelpers, CacheOptions, CacheSetting, Id, RequestOptions, Tag, TagIndex,
    Update,
};
