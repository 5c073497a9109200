use std::{collections::HashMap, time::Duration};

use http::{
    HeaderMap, Method,
    header::{HeaderName, HeaderValue},
};
use tag::Id;

/// Instruction applied to a store entry once the request carrying it succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Update {
    Delete,
}

/// Per-request cache configuration understood by the response store.
///
/// The tracked read/write wrappers only ever override `id` and `update`.
/// The other fields are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheOptions {
    pub id: Option<Id>,
    pub update: HashMap<Id, Update>,
    pub ttl: Option<Duration>,
    pub interpret_header: Option<bool>,
    pub stale_if_error: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheSetting {
    Disabled,
    Options(CacheOptions),
}

impl CacheSetting {
    pub fn options(&self) -> Option<&CacheOptions> {
        match self {
            CacheSetting::Disabled => None,
            CacheSetting::Options(options) => Some(options),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, CacheSetting::Disabled)
    }
}

impl From<CacheOptions> for CacheSetting {
    fn from(options: CacheOptions) -> Self {
        CacheSetting::Options(options)
    }
}

/// Everything a transport needs to issue one request.
///
/// Every field is optional so that layers can be shallow-merged with
/// [`RequestOptions::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub url: Option<String>,
    pub base_url: Option<String>,
    pub headers: Option<HeaderMap>,
    pub params: Option<Vec<(String, String)>>,
    pub body: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
    pub cache: Option<CacheSetting>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new().method(Method::GET).url(url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new().method(Method::POST).url(url)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cache(mut self, cache: impl Into<CacheSetting>) -> Self {
        self.cache = Some(cache.into());
        self
    }

    pub fn no_cache(mut self) -> Self {
        self.cache = Some(CacheSetting::Disabled);
        self
    }

    /// Shallow merge: every field set on `overrides` replaces the one on `self`.
    /// Maps such as `headers` are replaced as a whole, not merged key by key.
    pub fn merge(self, overrides: RequestOptions) -> RequestOptions {
        RequestOptions {
            method: overrides.method.or(self.method),
            url: overrides.url.or(self.url),
            base_url: overrides.base_url.or(self.base_url),
            headers: overrides.headers.or(self.headers),
            params: overrides.params.or(self.params),
            body: overrides.body.or(self.body),
            timeout: overrides.timeout.or(self.timeout),
            cache: overrides.cache.or(self.cache),
        }
    }

    /// Cache options to build on. A disabled or missing setting yields defaults.
    pub fn inherited_cache(&self) -> CacheOptions {
        self.cache
            .as_ref()
            .and_then(CacheSetting::options)
            .cloned()
            .unwrap_or_default()
    }

    pub fn method_or_default(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }

    /// `base_url` joined with `url`, unless `url` is already absolute.
    pub fn full_url(&self) -> String {
        let url = self.url.as_deref().unwrap_or_default();
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }

        match self.base_url.as_deref() {
            Some(base) if url.is_empty() => base.to_string(),
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            ),
            None => url.to_string(),
        }
    }
}
