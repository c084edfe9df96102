use super::*;
use libtaglist::config::Config;

fn mock_context(server: &mockito::Server) -> AppContext {
    let mut config = Config::default();
    config.network.timeout = 5;
    config
        .registries
        .aliases
        .insert("mock".to_string(), server.host_with_port());
    config.registries.insecure.push(server.host_with_port());
    AppContext { config }
}

#[test]
fn test_repository_name() {
    assert_eq!(repository_name("library", "alpine"), "library/alpine");
    assert_eq!(repository_name("", "alpine"), "alpine");
}

#[test]
fn test_format_pretty_one_tag_per_line() {
    let output = TagsOutput {
        registry: "docker.io".to_string(),
        repository: "library/alpine".to_string(),
        tags: vec!["3.19".to_string(), "edge".to_string(), "latest".to_string()],
    };
    assert_eq!(output.format_pretty(), "3.19\nedge\nlatest");
}

#[test]
fn test_format_pretty_empty() {
    let output = TagsOutput {
        registry: "docker.io".to_string(),
        repository: "library/alpine".to_string(),
        tags: Vec::new(),
    };
    assert_eq!(output.format_pretty(), "");
}

#[test]
fn test_format_json_output() {
    let output = TagsOutput {
        registry: "docker.io".to_string(),
        repository: "library/alpine".to_string(),
        tags: vec!["latest".to_string()],
    };
    let json = format::format_output(&output, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["repository"], "library/alpine");
    assert_eq!(value["tags"][0], "latest");
}

#[test]
fn test_list_tags_from_mock_registry() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/library/alpine/tags/list")
        .with_status(200)
        .with_body(r#"{"name":"library/alpine","tags":["edge","latest"]}"#)
        .create();

    let ctx = mock_context(&server);
    let output = list_tags(&ctx, "alpine", "library", "mock")
        .unwrap()
        .unwrap();

    mock.assert();
    assert_eq!(output.registry, "mock");
    assert_eq!(output.repository, "library/alpine");
    assert_eq!(output.tags, vec!["edge", "latest"]);
}

#[test]
fn test_list_tags_not_found_reports_status() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/library/missing/tags/list")
        .with_status(404)
        .create();

    let ctx = mock_context(&server);
    let outcome = list_tags(&ctx, "missing", "library", "mock")
        .unwrap()
        .unwrap_err();

    mock.assert();
    assert_eq!(
        outcome,
        TagsOutcome::Status {
            status: 404,
            error_count: 1,
        }
    );
    assert_eq!(
        describe_missing(&outcome, "mock", "library/missing"),
        "'library/missing' was not found on mock (404 Not Found)"
    );
}

#[test]
fn test_list_tags_without_tags_key_reports_no_tags() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/library/alpine/tags/list")
        .with_status(200)
        .with_body(r#"{"name":"library/alpine"}"#)
        .create();

    let ctx = mock_context(&server);
    let outcome = list_tags(&ctx, "alpine", "library", "mock")
        .unwrap()
        .unwrap_err();

    mock.assert();
    assert_eq!(outcome, TagsOutcome::NoTags);
}

#[test]
fn test_describe_exhausted_authorization() {
    let outcome = TagsOutcome::Status {
        status: 401,
        error_count: 4,
    };
    assert_eq!(
        describe_missing(&outcome, "docker.io", "library/alpine"),
        "docker.io still refused access to 'library/alpine' after 4 attempts (401 Unauthorized)"
    );
}

#[test]
fn test_describe_other_status_and_no_tags() {
    let server_error = TagsOutcome::Status {
        status: 503,
        error_count: 1,
    };
    assert_eq!(
        describe_missing(&server_error, "quay.io", "coreos/etcd"),
        "quay.io answered HTTP 503 for 'coreos/etcd'"
    );
    assert_eq!(
        describe_missing(&TagsOutcome::NoTags, "quay.io", "coreos/etcd"),
        "quay.io returned no tag list for 'coreos/etcd'"
    );
}
