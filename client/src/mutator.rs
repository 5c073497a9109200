use cache::RequestOptions;
use serde::de::DeserializeOwned;

use crate::{CachedClient, ClientError, Response, Transport};

/// Error type generated API clients see.
pub type MutatorError = ClientError;

/// Adapter for generated API clients.
///
/// `options` is shallow-merged over `config` (set fields win) and the result
/// goes through the shared `client`, so generated code gets response caching
/// without knowing about tags. The response body is decoded as `D`.
pub async fn mutator<D, T>(
    client: &CachedClient<T>,
    config: RequestOptions,
    options: Option<RequestOptions>,
) -> Result<Response<D>, MutatorError>
where
    D: DeserializeOwned,
    T: Transport,
{
    let request = match options {
        Some(options) => config.merge(options),
        None => config,
    };

    client.request_json(request).await
}
