use std::collections::HashMap;

use tag::{Id, Tag};

use crate::{CacheOptions, CacheSetting, RequestOptions, TagIndex, Update};

/// Runs a read with its store entry pinned to `id`, then registers `id` under
/// `tags`.
///
/// Whatever `perform` returns is passed through untouched. Registration only
/// happens once `perform` has succeeded, so a failed (or dropped) read never
/// leaves an id in the index.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", fields(%id, ?tags), skip_all)
)]
pub async fn execute_tracked_read<T, E, F, Fut>(
    index: &TagIndex,
    perform: F,
    id: Id,
    tags: &[Tag],
    options: RequestOptions,
) -> Result<T, E>
where
    F: FnOnce(RequestOptions) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let cache = CacheOptions {
        id: Some(id.clone()),
        ..options.inherited_cache()
    };

    let value = perform(RequestOptions {
        cache: Some(CacheSetting::Options(cache)),
        ..options
    })
    .await
    .inspect_err(|_| {
        #[cfg(feature = "tracing")]
        tracing::debug!("read failed, skipping registration");
    })?;

    index.register(&id, tags);
    Ok(value)
}

/// Runs a write that deletes every entry currently registered under
/// `invalidate`, then clears those tags.
///
/// The delete instruction is built from the index as it is *before* `perform`
/// runs. The tags are cleared once `perform` settles, whether it succeeded or
/// not. Anything registered under them in the meantime is cleared too.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", fields(?invalidate), skip_all)
)]
pub async fn execute_tracked_write<T, E, F, Fut>(
    index: &TagIndex,
    perform: F,
    invalidate: &[Tag],
    options: RequestOptions,
) -> Result<T, E>
where
    F: FnOnce(RequestOptions) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let update = delete_instruction(index.resolve(invalidate));

    #[cfg(feature = "tracing")]
    tracing::debug!(ids = update.len(), "invalidating");

    let cache = CacheOptions {
        update,
        ..options.inherited_cache()
    };

    let result = perform(RequestOptions {
        cache: Some(CacheSetting::Options(cache)),
        ..options
    })
    .await;

    index.clear(invalidate);
    result
}

/// Keys every id to [`Update::Delete`]. Repeated ids collapse into one entry.
pub fn delete_instruction(ids: impl IntoIterator<Item = Id>) -> HashMap<Id, Update> {
    ids.into_iter().map(|id| (id, Update::Delete)).collect()
}
