use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use tag::Id;

#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub data: T,
    /// Served from the store rather than the origin.
    pub cached: bool,
    /// Store entry the response was read from or written to.
    pub id: Option<Id>,
}

impl<T> Response<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            status: self.status,
            headers: self.headers,
            data: f(self.data),
            cached: self.cached,
            id: self.id,
        }
    }
}

impl Response<Bytes> {
    /// Decodes the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(self) -> Result<Response<T>, serde_json::Error> {
        let data = if self.data.is_empty() {
            serde_json::from_slice(b"null")?
        } else {
            serde_json::from_slice(&self.data)?
        };

        Ok(Response {
            status: self.status,
            headers: self.headers,
            data,
            cached: self.cached,
            id: self.id,
        })
    }
}
