use super::*;
use std::error::Error;

#[test]
fn test_network_error_connection_refused() {
    let err = TaglistError::Network {
        message: "connection refused".to_string(),
        source: None,
    };

    assert!(matches!(err, TaglistError::Network { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_network_with_source_helper_constructor() {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    let err = TaglistError::network_with_source("failed to connect", io_err);
    assert!(matches!(err, TaglistError::Network { .. }));
    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("Network error"));
}

#[test]
fn test_challenge_helper_constructor() {
    let err = TaglistError::challenge("missing 'realm'");
    assert!(matches!(err, TaglistError::Challenge { .. }));
    assert!(err.to_string().contains("missing 'realm'"));
    assert!(err.source().is_none());
}

#[test]
fn test_token_helper_constructor() {
    let err = TaglistError::token("response has no token");
    assert!(matches!(err, TaglistError::Token { .. }));
    assert!(err.to_string().contains("no token"));
}

#[test]
fn test_token_with_source_keeps_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
    let err = TaglistError::token_with_source("token response is not JSON", json_err);

    assert!(matches!(err, TaglistError::Token { .. }));
    assert!(err.source().is_some());
}

#[test]
fn test_decode_with_source_helper_constructor() {
    let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let err = TaglistError::decode_with_source("tag list is not JSON", json_err);

    assert!(matches!(err, TaglistError::Decode { .. }));
    assert!(err.to_string().contains("tag list is not JSON"));
    assert!(err.source().is_some());
}

#[test]
fn test_validation_helper_constructor() {
    let err = TaglistError::validation("image name cannot be empty");
    assert!(matches!(err, TaglistError::Validation { .. }));
    assert!(err.to_string().contains("image name cannot be empty"));
}

#[test]
fn test_config_with_source_helper_constructor() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err = TaglistError::config_with_source(
        "failed to read config",
        Some("/path/to/taglist.yaml"),
        io_err,
    );

    match &err {
        TaglistError::Config { path, .. } => {
            assert_eq!(path.as_deref(), Some("/path/to/taglist.yaml"));
        }
        _ => panic!("Expected Config error"),
    }
    assert!(err.source().unwrap().to_string().contains("file not found"));
}

#[test]
fn test_config_error_converts_from_config_crate() {
    let cfg_err = config::ConfigError::Message("bad value".to_string());
    let err: TaglistError = cfg_err.into();

    assert!(matches!(err, TaglistError::Config { path: None, .. }));
    assert!(err.source().is_some());
}

#[test]
fn test_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TaglistError>();
}
