use super::*;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
struct TestData {
    name: String,
    value: i32,
}

impl Formattable for TestData {
    fn format_pretty(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
}

fn sample() -> TestData {
    TestData {
        name: "test".to_string(),
        value: 42,
    }
}

#[test]
fn test_output_format_from_string() {
    let parse = |s: &str| OutputFormat::from_str(s, true);
    assert_eq!(parse("pretty"), Ok(OutputFormat::Pretty));
    assert_eq!(parse("json"), Ok(OutputFormat::Json));
    assert_eq!(parse("JSON"), Ok(OutputFormat::Json));
    assert_eq!(parse("yaml"), Ok(OutputFormat::Yaml));
    assert_eq!(parse("yml"), Ok(OutputFormat::Yaml));
}

#[test]
fn test_output_format_rejects_unknown_names() {
    assert!(OutputFormat::from_str("jsno", true).is_err());
    assert!(OutputFormat::from_str("", true).is_err());
}

#[test]
fn test_format_pretty() {
    let result = format_output(&sample(), OutputFormat::Pretty);
    assert_eq!(result.unwrap(), "test: 42");
}

#[test]
fn test_format_json() {
    let result = format_output(&sample(), OutputFormat::Json).unwrap();
    let json: serde_json::Value = serde_json::from_str(&result).unwrap();
    assert_eq!(json["name"], "test");
    assert_eq!(json["value"], 42);
}

#[test]
fn test_format_yaml() {
    let result = format_output(&sample(), OutputFormat::Yaml).unwrap();
    assert!(result.contains("name: test"));
    assert!(result.contains("value: 42"));
}

#[test]
fn test_error_chain_includes_sources() {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = libtaglist::TaglistError::network_with_source("Failed to connect", io_err);

    let rendered = error_chain(&err);
    assert!(rendered.starts_with("Network error: Failed to connect"));
    assert!(rendered.contains("caused by: refused"));
}

#[test]
fn test_error_chain_without_source() {
    let err = libtaglist::TaglistError::validation("bad input");
    assert_eq!(error_chain(&err), "Validation error: bad input");
}
