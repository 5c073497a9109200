use bytes::Bytes;
use http::StatusCode;

use crate::TransportError;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("transport :: {0}")]
    Transport(#[from] TransportError),

    #[error("unexpected status :: {status}")]
    Status { status: StatusCode, body: Bytes },

    #[error("decode response body :: {0}")]
    Decode(#[from] serde_json::Error),
}
