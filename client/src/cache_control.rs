use std::time::Duration;

use http::{HeaderMap, header::CACHE_CONTROL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Freshness {
    NoStore,
    MaxAge(Duration),
    Unspecified,
}

/// Reads the storage directives of a response's `Cache-Control` header.
/// `no-cache` is treated like `no-store` since entries are never revalidated.
pub(crate) fn freshness(headers: &HeaderMap) -> Freshness {
    let mut max_age = None;

    for value in headers.get_all(CACHE_CONTROL) {
        let Ok(value) = value.to_str() else {
            continue;
        };

        for directive in value.split(',') {
            let directive = directive.trim().to_ascii_lowercase();
            match directive.split_once('=').map(|(n, v)| (n.trim_end(), v.trim_start())) {
                None if directive == "no-store" || directive == "no-cache" => {
                    return Freshness::NoStore;
                }
                Some(("max-age", seconds)) => {
                    if let Ok(seconds) = seconds.trim_matches('"').parse::<u64>() {
                        max_age = Some(Duration::from_secs(seconds));
                    }
                }
                _ => {}
            }
        }
    }

    max_age.map_or(Freshness::Unspecified, Freshness::MaxAge)
}
