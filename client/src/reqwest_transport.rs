use bytes::Bytes;
use cache::RequestOptions;
use http::header::{CONTENT_TYPE, HeaderValue};

use crate::{Transport, TransportError};

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ReqwestTransport {
    /// Builds the outgoing request. A JSON body gets `Content-Type:
    /// application/json` unless the caller's headers already name one.
    pub fn build(&self, request: RequestOptions) -> Result<reqwest::Request, TransportError> {
        let url = request.full_url();
        if url.is_empty() {
            return Err(TransportError::InvalidRequest("missing url".to_string()));
        }

        let mut builder = self.client.request(request.method_or_default(), url.as_str());
        let mut headers = request.headers.unwrap_or_default();

        if let Some(params) = &request.params {
            builder = builder.query(params);
        }
        if let Some(body) = &request.body {
            let body = serde_json::to_vec(body)
                .map_err(|e| TransportError::InvalidRequest(format!("encode body :: {e}")))?;
            headers
                .entry(CONTENT_TYPE)
                .or_insert(HeaderValue::from_static("application/json"));
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.headers(headers).build()?)
    }
}

impl Transport for ReqwestTransport {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(url = %request.full_url()), skip_all, err)
    )]
    async fn send(&self, request: RequestOptions) -> Result<http::Response<Bytes>, TransportError> {
        let request = self.build(request)?;
        let response = self.client.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut out = http::Response::new(body);
        *out.status_mut() = status;
        *out.headers_mut() = headers;
        Ok(out)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Other(Box::new(err))
        }
    }
}
