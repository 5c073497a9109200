use std::sync::Arc;

use tag::{Id, Tag};

use crate::{BaseConfig, RequestOptions, TagIndex, execute_tracked_read, execute_tracked_write};

/// Tracked read/write pre-bound to an index and a base configuration.
#[derive(Debug, Clone)]
pub struct CacheHelpers {
    index: Arc<TagIndex>,
    base: BaseConfig,
}

impl CacheHelpers {
    pub fn new(index: Arc<TagIndex>, base: impl Into<BaseConfig>) -> Self {
        Self {
            index,
            base: base.into(),
        }
    }

    pub fn index(&self) -> &Arc<TagIndex> {
        &self.index
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }

    pub async fn query<T, E, F, Fut>(
        &self,
        perform: F,
        id: Id,
        tags: &[Tag],
        options: Option<RequestOptions>,
    ) -> Result<T, E>
    where
        F: FnOnce(RequestOptions) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        execute_tracked_read(&self.index, perform, id, tags, self.base.resolve(options)).await
    }

    pub async fn mutation<T, E, F, Fut>(
        &self,
        perform: F,
        invalidate: &[Tag],
        options: Option<RequestOptions>,
    ) -> Result<T, E>
    where
        F: FnOnce(RequestOptions) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        execute_tracked_write(&self.index, perform, invalidate, self.base.resolve(options)).await
    }
}
