use crate::{ApiError, display_path, resolve_web_root};

use axum::http::{HeaderMap, HeaderValue, header};
use googletest::prelude::*;

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(value));
    }
    map
}

#[test]
fn given_public_url_when_resolve_then_used_without_trailing_slash() {
    let map = headers(&[("host", "internal:7171")]);

    let root = resolve_web_root(Some("https://lists.example.com/"), &map).unwrap();

    assert_that!(root.as_str(), eq("https://lists.example.com"));
}

#[test]
fn given_forwarded_https_when_resolve_then_https_with_host() {
    let map = headers(&[("host", "lists.example.com"), ("x-forwarded-proto", "https")]);

    let root = resolve_web_root(None, &map).unwrap();

    assert_that!(root.as_str(), eq("https://lists.example.com"));
}

#[test]
fn given_only_host_when_resolve_then_http() {
    let map = headers(&[("host", "localhost:7171")]);

    let root = resolve_web_root(None, &map).unwrap();

    assert_that!(root.as_str(), eq("http://localhost:7171"));
}

#[test]
fn given_unexpected_forwarded_proto_when_resolve_then_http() {
    let map = headers(&[("host", "localhost"), ("x-forwarded-proto", "gopher")]);

    let root = resolve_web_root(None, &map).unwrap();

    assert_that!(root.as_str(), eq("http://localhost"));
}

#[test]
fn given_no_host_when_resolve_then_bad_request() {
    let result = resolve_web_root(None, &HeaderMap::new());

    assert!(matches!(result, Err(ApiError::BadRequest { .. })));
}

#[test]
fn given_blank_public_url_when_resolve_then_falls_back_to_host() {
    let mut map = HeaderMap::new();
    map.insert(header::HOST, HeaderValue::from_static("example.org"));

    let root = resolve_web_root(Some("  "), &map).unwrap();

    assert_that!(root.as_str(), eq("http://example.org"));
}

#[test]
fn given_list_name_with_spaces_when_display_path_then_encoded() {
    assert_that!(display_path("news").as_str(), eq("/admin/list/display/news"));
    assert_that!(
        display_path("team news").as_str(),
        eq("/admin/list/display/team%20news")
    );
}
