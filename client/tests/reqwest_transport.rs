#![cfg(feature = "reqwest")]

use client::{ReqwestTransport, RequestOptions, TransportError};
use http::{
    HeaderValue,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde_json::json;

#[test]
fn json_body_gets_content_type() {
    let transport = ReqwestTransport::default();

    let request = transport
        .build(RequestOptions::post("http://localhost/posts").json(json!({ "title": "hi" })))
        .unwrap();

    let content_types: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
    assert_eq!(content_types, vec![&HeaderValue::from_static("application/json")]);
    assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&br#"{"title":"hi"}"#[..]));
}

#[test]
fn caller_content_type_is_not_duplicated() {
    let transport = ReqwestTransport::default();

    let request = transport
        .build(
            RequestOptions::post("http://localhost/posts")
                .header(CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"))
                .header(ACCEPT, HeaderValue::from_static("application/json"))
                .json(json!({ "title": "hi" })),
        )
        .unwrap();

    let content_types: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
    assert_eq!(
        content_types,
        vec![&HeaderValue::from_static("application/merge-patch+json")]
    );
    assert_eq!(request.headers().get(ACCEPT).unwrap(), "application/json");
}

#[test]
fn bodyless_request_has_no_content_type() {
    let transport = ReqwestTransport::default();

    let request = transport
        .build(
            RequestOptions::get("/search")
                .base_url("http://localhost")
                .param("q", "a b"),
        )
        .unwrap();

    assert!(request.headers().get(CONTENT_TYPE).is_none());
    assert_eq!(request.url().as_str(), "http://localhost/search?q=a+b");
}

#[test]
fn missing_url_is_rejected() {
    let err = ReqwestTransport::default()
        .build(RequestOptions::new())
        .unwrap_err();

    assert!(matches!(err, TransportError::InvalidRequest(_)));
}
