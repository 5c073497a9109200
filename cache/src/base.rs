use std::{fmt, sync::Arc};

use crate::RequestOptions;

type Producer = Arc<dyn Fn() -> Option<RequestOptions> + Send + Sync>;

/// Request options every helper call starts from.
///
/// A [`BaseConfig::Producer`] is called again on every request, so it can
/// hand out values that change over time (rotating auth headers, ...).
#[derive(Clone, Default)]
pub enum BaseConfig {
    #[default]
    Empty,
    Static(RequestOptions),
    Producer(Producer),
}

impl BaseConfig {
    pub fn producer(produce: impl Fn() -> Option<RequestOptions> + Send + Sync + 'static) -> Self {
        BaseConfig::Producer(Arc::new(produce))
    }

    pub fn current(&self) -> Option<RequestOptions> {
        match self {
            BaseConfig::Empty => None,
            BaseConfig::Static(options) => Some(options.clone()),
            BaseConfig::Producer(produce) => produce(),
        }
    }

    /// Effective options for one call: the current base with `options` merged
    /// over it. Explicit options win.
    pub fn resolve(&self, options: Option<RequestOptions>) -> RequestOptions {
        let base = self.current().unwrap_or_default();
        match options {
            Some(options) => base.merge(options),
            None => base,
        }
    }
}

impl From<RequestOptions> for BaseConfig {
    fn from(options: RequestOptions) -> Self {
        BaseConfig::Static(options)
    }
}

impl fmt::Debug for BaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseConfig::Empty => f.write_str("Empty"),
            BaseConfig::Static(options) => f.debug_tuple("Static").field(options).finish(),
            BaseConfig::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}
