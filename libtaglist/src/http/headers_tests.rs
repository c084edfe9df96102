use super::*;
use reqwest::header::{HeaderName, HeaderValue};

#[test]
fn test_get_is_case_insensitive() {
    let headers: Headers = [("WWW-Authenticate", "Bearer realm=\"r\"")]
        .into_iter()
        .collect();

    assert_eq!(headers.get("www-authenticate"), Some("Bearer realm=\"r\""));
    assert_eq!(headers.get("Www-Authenticate"), Some("Bearer realm=\"r\""));
    assert!(headers.contains("WWW-AUTHENTICATE"));
}

#[test]
fn test_get_missing_header() {
    let headers = Headers::new();
    assert_eq!(headers.get("content-type"), None);
    assert!(headers.is_empty());
}

#[test]
fn test_append_keeps_repeated_values() {
    let mut headers = Headers::new();
    headers.append("Link", "<a>; rel=\"next\"");
    headers.append("link", "<b>; rel=\"prev\"");

    assert_eq!(headers.len(), 2);
    assert_eq!(headers.get("LINK"), Some("<a>; rel=\"next\""));
    let all: Vec<&str> = headers.get_all("Link").collect();
    assert_eq!(all, vec!["<a>; rel=\"next\"", "<b>; rel=\"prev\""]);
}

#[test]
fn test_insert_replaces_all_casings() {
    let mut headers = Headers::new();
    headers.append("authorization", "Bearer old");
    headers.append("Authorization", "Bearer older");
    headers.insert("AUTHORIZATION", "Bearer new");

    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("authorization"), Some("Bearer new"));
}

#[test]
fn test_iter_preserves_order() {
    let headers: Headers = [("b", "2"), ("a", "1")].into_iter().collect();
    let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_from_header_map() {
    let mut map = HeaderMap::new();
    map.insert(
        HeaderName::from_static("www-authenticate"),
        HeaderValue::from_static("Bearer realm=\"https://auth.example/token\""),
    );
    map.append(
        HeaderName::from_static("x-multi"),
        HeaderValue::from_static("one"),
    );
    map.append(
        HeaderName::from_static("x-multi"),
        HeaderValue::from_static("two"),
    );

    let headers = Headers::from_header_map(&map);

    assert_eq!(
        headers.get("WWW-Authenticate"),
        Some("Bearer realm=\"https://auth.example/token\"")
    );
    assert_eq!(headers.get_all("X-Multi").count(), 2);
}
