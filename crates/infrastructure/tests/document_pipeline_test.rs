//! End-to-end tests: capture, validate, render with the built-in templates,
//! and write snippets to disk.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use restdocs_application::{
    ApplicationError, DocumentExchange, DocumentExchangeInput, DocumentRenderer, SnippetRegistry,
};
use restdocs_domain::{
    ConfigPatch, ConfigService, DeclaredDescriptors, DomainError, FieldType, HttpCapture,
    OutputLayout, RestDocsConfig, SnippetFormat, define_field,
};
use restdocs_infrastructure::{
    BuiltinTemplateStore, FileSnippetWriter, FileTemplateStore, MiniJinjaRenderer, TokioFileSystem,
};
use serde_json::json;
use tempfile::tempdir;

type BuiltinExchange =
    DocumentExchange<BuiltinTemplateStore, MiniJinjaRenderer, FileSnippetWriter<TokioFileSystem>>;

fn exchange(config: &RestDocsConfig) -> BuiltinExchange {
    let registry = SnippetRegistry::new(
        Arc::new(BuiltinTemplateStore::new(config.format)),
        Arc::new(MiniJinjaRenderer::new()),
    );
    DocumentExchange::new(
        DocumentRenderer::new(registry, config),
        FileSnippetWriter::from_config(TokioFileSystem::new(), config),
    )
}

fn create_user(body: serde_json::Value) -> HttpCapture {
    HttpCapture::new("POST", "http://localhost:8080/users")
        .with_request_header("Content-Type", "application/json")
        .with_request_body(body)
        .with_status(201)
        .with_response_header("Location", "/users/1")
}

fn username_declared() -> DeclaredDescriptors {
    DeclaredDescriptors::new().with_request_fields(vec![
        define_field("username")
            .field_type(FieldType::String)
            .description("Login name")
            .to_descriptor()
            .unwrap(),
    ])
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn strict_exchange_writes_asciidoc_snippets() {
    let dir = tempdir().unwrap();
    let mut service = ConfigService::new();
    let config = service.init(ConfigPatch::new().with_output(dir.path()).with_strict(true));

    let output = exchange(&config)
        .execute(DocumentExchangeInput {
            identifier: "create-user".to_string(),
            capture: create_user(json!({"username": "alice"})),
            declared: username_declared(),
        })
        .await
        .unwrap();

    assert_eq!(output.document.names(), vec![
        "curl-request",
        "http-request",
        "http-response",
        "request-body",
        "request-fields",
        "request-headers",
        "response-body",
        "response-headers",
    ]);
    assert_eq!(output.written.len(), 8);

    let snippets = dir.path().join("create-user");
    assert_eq!(
        read(&snippets.join("http-request.adoc")),
        "[source,http,options=\"nowrap\"]\n----\nPOST /users HTTP/1.1\nContent-Type: application/json\nHost: localhost:8080\n\n{\n  \"username\": \"alice\"\n}\n----\n"
    );
    assert_eq!(
        read(&snippets.join("http-response.adoc")),
        "[source,http,options=\"nowrap\"]\n----\nHTTP/1.1 201 Created\nLocation: /users/1\n----\n"
    );
    assert_eq!(
        read(&snippets.join("curl-request.adoc")),
        "[source,bash]\n----\n$ curl 'http://localhost:8080/users' -i -X POST \\\n    -H 'Content-Type: application/json' \\\n    -d '{\"username\":\"alice\"}'\n----\n"
    );
    assert_eq!(
        read(&snippets.join("request-fields.adoc")),
        "|===\n|Path|Type|Description\n\n|`+username+`\n|`+string+`\n|Login name\n\n|===\n"
    );
    assert!(!snippets.join("response-fields.adoc").exists());
}

#[tokio::test]
async fn strict_exchange_rejects_undeclared_field() {
    let dir = tempdir().unwrap();
    let config = ConfigPatch::new()
        .with_output(dir.path())
        .with_strict(true)
        .apply(&RestDocsConfig::default());

    let result = exchange(&config)
        .execute(DocumentExchangeInput {
            identifier: "create-user".to_string(),
            capture: create_user(json!({"username": "alice", "secret": "hunter2"})),
            declared: username_declared(),
        })
        .await;

    let Err(ApplicationError::Domain(DomainError::UnexpectedField(error))) = result else {
        panic!("expected an unexpected field error");
    };
    assert_eq!(error.extra_fields(), ["secret".to_string()]);
    assert_eq!(error.context(), "request");
    assert!(!dir.path().join("create-user").exists());
}

#[tokio::test]
async fn strict_exchange_checks_json_text_body() {
    let dir = tempdir().unwrap();
    let config = ConfigPatch::new()
        .with_output(dir.path())
        .with_strict(true)
        .apply(&RestDocsConfig::default());

    let result = exchange(&config)
        .execute(DocumentExchangeInput {
            identifier: "create-user".to_string(),
            capture: create_user(json!(r#"{"username":"alice","secret":"hunter2"}"#)),
            declared: username_declared(),
        })
        .await;

    let Err(ApplicationError::Domain(DomainError::UnexpectedField(error))) = result else {
        panic!("expected an unexpected field error");
    };
    assert_eq!(error.extra_fields(), ["secret".to_string()]);
}

#[tokio::test]
async fn lenient_exchange_documents_undeclared_fields() {
    let dir = tempdir().unwrap();
    let config = ConfigPatch::new()
        .with_output(dir.path())
        .apply(&RestDocsConfig::default());

    let output = exchange(&config)
        .execute(DocumentExchangeInput {
            identifier: "create-user".to_string(),
            capture: create_user(json!({"username": "alice", "secret": "hunter2"})),
            declared: username_declared(),
        })
        .await
        .unwrap();

    let fields = output.document.get("request-fields").unwrap();
    assert!(fields.contains("|`+username+`\n|`+string+`\n|Login name\n"));
    assert!(fields.contains("|`+secret+`\n|`+string+`\n|\n"));
}

#[tokio::test]
async fn markdown_flat_layout() {
    let dir = tempdir().unwrap();
    let mut service = ConfigService::new();
    service.init(ConfigPatch::new().with_output(dir.path()));
    let before = service.get().unwrap();
    let config = service
        .update(
            &ConfigPatch::new()
                .with_format(SnippetFormat::Md)
                .with_layout(OutputLayout::Flat),
        )
        .unwrap();
    assert_eq!(before.format, SnippetFormat::Adoc);

    let declared = DeclaredDescriptors::new().with_response_fields(vec![
        define_field("id")
            .field_type(FieldType::Number)
            .description("User id")
            .to_descriptor()
            .unwrap(),
    ]);
    let capture = HttpCapture::new("GET", "http://localhost:8080/users/1")
        .with_status(200)
        .with_response_header("Content-Type", "application/json")
        .with_response_body(json!({"id": 1}));

    exchange(&config)
        .execute(DocumentExchangeInput {
            identifier: "get-user".to_string(),
            capture,
            declared,
        })
        .await
        .unwrap();

    assert_eq!(
        read(&dir.path().join("get-user-http-response.md")),
        "```http\nHTTP/1.1 200 OK\nContent-Type: application/json\n\n{\n  \"id\": 1\n}\n```\n"
    );
    assert_eq!(
        read(&dir.path().join("get-user-response-fields.md")),
        "| Path | Type | Description |\n| --- | --- | --- |\n| `id` | `number` | User id |\n"
    );
}

#[tokio::test]
async fn custom_templates_from_directory() {
    let templates = tempdir().unwrap();
    std::fs::write(
        templates.path().join("http-request.txt"),
        "{{ method }} {{ path }}\n",
    )
    .unwrap();

    let registry = SnippetRegistry::with_snippets(
        Arc::new(FileTemplateStore::new(TokioFileSystem::new(), templates.path())),
        Arc::new(MiniJinjaRenderer::new()),
        &[restdocs_domain::SnippetKind::HttpRequest],
    );
    let renderer = DocumentRenderer::new(registry, &RestDocsConfig::default());
    let snapshot = restdocs_domain::DocumentSnapshot::assemble(
        HttpCapture::new("get", "http://localhost/ping?x=1"),
        DeclaredDescriptors::new(),
    )
    .unwrap();

    let document = renderer.render(snapshot).await.unwrap();

    let snippet = document.snippet("http-request").unwrap();
    assert_eq!(snippet.extension, "txt");
    assert_eq!(snippet.content, "GET /ping?x=1\n");
}

#[tokio::test]
async fn invalid_identifier_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = ConfigPatch::new()
        .with_output(dir.path().join("out"))
        .apply(&RestDocsConfig::default());

    let result = exchange(&config)
        .execute(DocumentExchangeInput {
            identifier: "../escape".to_string(),
            capture: create_user(json!({"username": "alice"})),
            declared: DeclaredDescriptors::new(),
        })
        .await;

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidInput(_)))
    ));
    assert!(!dir.path().join("out").exists());
}
