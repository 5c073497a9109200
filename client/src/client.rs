use std::{collections::HashMap, sync::Arc};

use bytes::Bytes;
use cache::{
    BaseConfig, CacheHelpers, CacheOptions, CacheSetting, RequestOptions, TagIndex, Update,
    execute_tracked_read, execute_tracked_write,
};
use dashcache::{DashCache, Lookup};
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use tag::{Id, Tag};

use crate::{
    ClientConfig, ClientError, Response, Transport,
    cache_control::{Freshness, freshness},
};

/// A response as kept in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CachedResponse {
    fn into_response(self, id: Option<Id>, cached: bool) -> Response<Bytes> {
        Response {
            status: self.status,
            headers: self.headers,
            data: self.body,
            cached,
            id,
        }
    }
}

/// HTTP client with a response store and the tag index feeding it.
///
/// GET and HEAD responses are stored under `cache.id` when the request sets
/// one, otherwise under `"{METHOD} {url}"` with the query params appended in
/// order. Every successful response applies the request's `cache.update`
/// instructions to the store, which is how tracked writes evict the entries
/// registered under their tags.
///
/// Expired entries stay in the store so they can be served when the origin
/// fails. Owners call [`CachedClient::purge_expired`] to reclaim them.
pub struct CachedClient<T> {
    transport: T,
    store: DashCache<Id, CachedResponse>,
    index: Arc<TagIndex>,
    config: ClientConfig,
}

impl<T: Transport> CachedClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            store: DashCache::new(config.ttl),
            index: Arc::new(TagIndex::new()),
            config,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn store(&self) -> &DashCache<Id, CachedResponse> {
        &self.store
    }

    pub fn index(&self) -> &Arc<TagIndex> {
        &self.index
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Read/write helpers sharing this client's tag index.
    pub fn helpers(&self, base: impl Into<BaseConfig>) -> CacheHelpers {
        CacheHelpers::new(Arc::clone(&self.index), base)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            fields(method = %request.method_or_default(), url = %request.full_url()),
            skip_all
        )
    )]
    pub async fn request(&self, request: RequestOptions) -> Result<Response<Bytes>, ClientError> {
        let method = request.method_or_default();
        let options = request.inherited_cache();
        let disabled = request
            .cache
            .as_ref()
            .is_some_and(CacheSetting::is_disabled);
        let cacheable = !disabled && (method == Method::GET || method == Method::HEAD);
        let key = match &options.id {
            Some(id) => id.clone(),
            None => default_key(&method, &request),
        };

        let stale = match cacheable.then(|| self.store.get(&key)).flatten() {
            Some(Lookup::Fresh(hit)) => return Ok(hit.into_response(Some(key), true)),
            Some(Lookup::Stale(entry)) => Some(entry),
            None => None,
        };
        let stale_if_error = options.stale_if_error.unwrap_or(self.config.stale_if_error);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                return match stale.filter(|_| stale_if_error) {
                    Some(entry) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!("serving stale entry '{}' :: {}", key, err);

                        Ok(entry.into_response(Some(key), true))
                    }
                    None => Err(err.into()),
                };
            }
        };

        let (parts, body) = response.into_parts();
        if !parts.status.is_success() {
            if let Some(entry) =
                stale.filter(|_| stale_if_error && parts.status.is_server_error())
            {
                #[cfg(feature = "tracing")]
                tracing::warn!("serving stale entry '{}' :: {}", key, parts.status);

                return Ok(entry.into_response(Some(key), true));
            }
            return Err(ClientError::Status {
                status: parts.status,
                body,
            });
        }

        self.apply_update(&options.update);

        let entry = CachedResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        };

        if cacheable {
            self.keep(&key, &entry, &options);
            Ok(entry.into_response(Some(key), false))
        } else {
            Ok(entry.into_response(options.id, false))
        }
    }

    pub async fn request_json<D: DeserializeOwned>(
        &self,
        request: RequestOptions,
    ) -> Result<Response<D>, ClientError> {
        Ok(self.request(request).await?.json()?)
    }

    /// Tracked read: stores the response under `id` and registers `id` under `tags`.
    pub async fn query<D: DeserializeOwned>(
        &self,
        id: Id,
        tags: &[Tag],
        request: RequestOptions,
    ) -> Result<Response<D>, ClientError> {
        execute_tracked_read(
            &self.index,
            |options| self.request_json(options),
            id,
            tags,
            request,
        )
        .await
    }

    /// Tracked write: evicts every entry registered under `invalidate`.
    pub async fn mutation<D: DeserializeOwned>(
        &self,
        invalidate: &[Tag],
        request: RequestOptions,
    ) -> Result<Response<D>, ClientError> {
        execute_tracked_write(
            &self.index,
            |options| self.request_json(options),
            invalidate,
            request,
        )
        .await
    }

    /// Drops expired entries, returning how many were dropped. Entries that
    /// are gone can no longer be served stale.
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired()
    }

    fn apply_update(&self, update: &HashMap<Id, Update>) {
        for (id, action) in update {
            match action {
                Update::Delete => {
                    self.store.remove(id);
                }
            }
        }
    }

    fn keep(&self, key: &Id, entry: &CachedResponse, options: &CacheOptions) {
        let interpret = options
            .interpret_header
            .unwrap_or(self.config.interpret_header);
        let directive = if interpret {
            freshness(&entry.headers)
        } else {
            Freshness::Unspecified
        };

        let ttl = match directive {
            Freshness::NoStore => {
                #[cfg(feature = "tracing")]
                tracing::debug!("'{}' not stored :: no-store", key);

                self.store.remove(key);
                return;
            }
            Freshness::MaxAge(ttl) => ttl,
            Freshness::Unspecified => options.ttl.unwrap_or(self.config.ttl),
        };

        self.store.put_with_ttl(key.clone(), entry.clone(), ttl);
    }
}

fn default_key(method: &Method, request: &RequestOptions) -> Id {
    let mut key = format!("{method} {}", request.full_url());
    let params = request.params.as_deref().unwrap_or_default();
    for (i, (name, value)) in params.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    Id::new(key)
}
