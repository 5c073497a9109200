mod base;
mod helpers;
mod index;
mod options;
mod tracked;

pub use base::BaseConfig;
pub use helpers::CacheHelpers;
pub use index::TagIndex;
pub use options::{CacheOptions, CacheSetting, RequestOptions, Update};
pub use tracked::{delete_instruction, execute_tracked_read, execute_tracked_write};

pub use tag::{Id, Tag};
