use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use cache::{
    BaseConfig, CacheHelpers, CacheSetting, Id, RequestOptions, Tag, TagIndex, Update,
};
use http::{
    Method,
    header::{AUTHORIZATION, HeaderValue},
};

fn tags(names: &[&str]) -> Vec<Tag> {
    names.iter().map(|name| Tag::from(*name)).collect()
}

#[test]
fn explicit_options_win_over_base() {
    let base = BaseConfig::from(
        RequestOptions::get("/default")
            .base_url("https://api.test")
            .timeout(Duration::from_secs(10)),
    );

    let resolved = base.resolve(Some(RequestOptions::new().url("/users").method(Method::PUT)));

    assert_eq!(resolved.url.as_deref(), Some("/users"));
    assert_eq!(resolved.method, Some(Method::PUT));
    assert_eq!(resolved.base_url.as_deref(), Some("https://api.test"));
    assert_eq!(resolved.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn headers_are_replaced_not_merged() {
    let base = BaseConfig::from(
        RequestOptions::new().header(AUTHORIZATION, HeaderValue::from_static("Token base")),
    );

    let resolved = base.resolve(Some(
        RequestOptions::new().header(http::header::ACCEPT, HeaderValue::from_static("*/*")),
    ));

    let headers = resolved.headers.unwrap();
    assert!(headers.get(AUTHORIZATION).is_none());
    assert_eq!(headers.get(http::header::ACCEPT).unwrap(), "*/*");
}

#[test]
fn empty_base_resolves_to_options() {
    assert_eq!(BaseConfig::Empty.resolve(None), RequestOptions::default());
    assert_eq!(
        BaseConfig::default().resolve(Some(RequestOptions::get("/x"))),
        RequestOptions::get("/x")
    );
}

#[test]
fn producer_is_called_on_every_resolve() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let base = BaseConfig::producer(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        let token = HeaderValue::from_str(&format!("Token {n}")).ok()?;
        Some(RequestOptions::new().header(AUTHORIZATION, token))
    });

    let first = base.resolve(None);
    let second = base.resolve(None);

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(first.headers.unwrap().get(AUTHORIZATION).unwrap(), "Token 0");
    assert_eq!(second.headers.unwrap().get(AUTHORIZATION).unwrap(), "Token 1");
}

#[test]
fn producer_returning_none_acts_as_empty() {
    let base = BaseConfig::producer(|| None);
    assert_eq!(base.resolve(None), RequestOptions::default());
    assert_eq!(format!("{base:?}"), "Producer(..)");
}

#[tokio::test]
async fn helpers_track_reads_and_invalidate_on_writes() {
    let index = Arc::new(TagIndex::new());
    let helpers = CacheHelpers::new(
        Arc::clone(&index),
        RequestOptions::new().base_url("https://api.test"),
    );

    let seen = Mutex::new(Vec::new());

    let user = helpers
        .query(
            |options| {
                seen.lock().unwrap().push(options);
                async { Ok::<_, ()>("alice") }
            },
            Id::from("user:1"),
            &tags(&["user"]),
            Some(RequestOptions::get("/users/1")),
        )
        .await
        .unwrap();
    assert_eq!(user, "alice");
    assert!(index.contains("user", "user:1"));

    helpers
        .mutation(
            |options| {
                seen.lock().unwrap().push(options);
                async { Ok::<_, ()>(()) }
            },
            &tags(&["user"]),
            Some(RequestOptions::post("/users/1")),
        )
        .await
        .unwrap();
    assert!(helpers.index().is_empty());

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen[0].full_url(), "https://api.test/users/1");
    assert_eq!(seen[1].method, Some(Method::POST));

    let Some(CacheSetting::Options(write_cache)) = &seen[1].cache else {
        panic!("write carries cache options");
    };
    assert_eq!(write_cache.update.get("user:1"), Some(&Update::Delete));
}
