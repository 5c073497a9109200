use std::sync::Mutex;

use bytes::Bytes;
use client::{RequestOptions, Transport, TransportError};
use http::{HeaderValue, StatusCode, header::CACHE_CONTROL};

type Handler =
    Box<dyn Fn(&RequestOptions) -> Result<http::Response<Bytes>, TransportError> + Send + Sync>;

/// Records every request and answers through `handler`.
pub struct MockTransport {
    handler: Handler,
    requests: Mutex<Vec<RequestOptions>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&RequestOptions) -> Result<http::Response<Bytes>, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Echoes the request url back as a JSON string.
    pub fn echo() -> Self {
        Self::new(|request| Ok(json(StatusCode::OK, &request.full_url())))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RequestOptions> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: RequestOptions) -> Result<http::Response<Bytes>, TransportError> {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

pub fn json(status: StatusCode, body: &impl serde::Serialize) -> http::Response<Bytes> {
    let mut response = http::Response::new(Bytes::from(serde_json::to_vec(body).unwrap()));
    *response.status_mut() = status;
    response
}

pub fn with_cache_control(mut response: http::Response<Bytes>, value: &'static str) -> http::Response<Bytes> {
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static(value));
    response
}
