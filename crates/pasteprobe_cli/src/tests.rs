//! Unit tests for the `pprobe` CLI entrypoint module.

use super::{execute, format_created, format_view, Cli, CommandFailure, Commands};
use clap::Parser;
use pasteprobe_core::models::CreatedAt;
use pasteprobe_core::test_support::{
    fixture_content, MockBackend, CREATED_ID, FETCH_HTML_OK, FETCH_MISSING,
};
use pasteprobe_core::{ApiClient, CreatedPaste, PasteRecord};
use reqwest::Url;
use serde_json::json;
use tempfile::TempDir;

fn client_for(backend: &MockBackend) -> ApiClient {
    ApiClient::with_http(&backend.url(), reqwest::Client::new()).expect("client")
}

fn write_input(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("input.txt");
    std::fs::write(&path, content).expect("write input");
    path
}

fn create_command(file: std::path::PathBuf, ttl: &str, max_views: &str) -> Commands {
    Commands::Create {
        file: Some(file),
        ttl: ttl.to_string(),
        max_views: max_views.to_string(),
    }
}

#[test]
fn cli_parses_create_flags() {
    let cli = Cli::try_parse_from([
        "pprobe",
        "create",
        "--file",
        "notes.txt",
        "--ttl",
        "60",
        "--max-views",
        "2",
    ])
    .expect("cli should parse create");
    match cli.command {
        Commands::Create {
            file,
            ttl,
            max_views,
        } => {
            assert_eq!(file.as_deref(), Some(std::path::Path::new("notes.txt")));
            assert_eq!(ttl, "60");
            assert_eq!(max_views, "2");
        }
        _ => panic!("expected create command"),
    }
}

#[test]
fn cli_parses_view_download_and_global_flags() {
    let cli = Cli::try_parse_from(["pprobe", "view", "xyz", "--download", "out", "--json"])
        .expect("cli should parse view");
    assert!(cli.json);
    match cli.command {
        Commands::View { id, download } => {
            assert_eq!(id, "xyz");
            assert_eq!(download.as_deref(), Some(std::path::Path::new("out")));
        }
        _ => panic!("expected view command"),
    }
}

#[test]
fn format_created_matrix_covers_json_and_summary() {
    let created = CreatedPaste {
        id: "abc123".to_string(),
        payload: json!({ "id": "abc123", "views": 0 }),
        view_url: Url::parse("http://127.0.0.1:8787/p/abc123").expect("url"),
        api_url: Url::parse("http://127.0.0.1:8787/api/pastes/abc123").expect("url"),
    };
    let rendered = format_created(&created, true).expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
    assert_eq!(parsed, created.payload);

    let summary = format_created(&created, false).expect("summary");
    assert!(summary.contains("Created: abc123"));
    assert!(summary.contains("http://127.0.0.1:8787/p/abc123"));
    assert!(summary.contains("http://127.0.0.1:8787/api/pastes/abc123"));
}

#[test]
fn format_view_lists_metadata_then_content() {
    let record = PasteRecord {
        id: "xyz".to_string(),
        content: "hello".to_string(),
        created_at: Some(CreatedAt::Epoch(1_714_566_600)),
        ttl_seconds: None,
        max_views: None,
        views: Some(4),
    };
    let rendered = format_view(&record, false).expect("view");
    assert_eq!(
        rendered,
        "ID       xyz\nCreated  2024-05-01 12:30:00 UTC\nViews    4\n\nhello"
    );
}

#[tokio::test]
async fn create_reports_id_and_links() {
    let backend = MockBackend::start();
    let client = client_for(&backend);
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "hello from a file");

    let output = execute(&client, create_command(input, "", "5"), false, false)
        .await
        .expect("create");
    assert!(output.starts_with(&format!("Created: {}", CREATED_ID)));
    assert_eq!(
        backend.state().created_bodies(),
        vec![json!({ "content": "hello from a file", "max_views": 5 })]
    );
}

#[tokio::test]
async fn create_validation_happens_before_any_request() {
    let backend = MockBackend::start();
    let client = client_for(&backend);
    let dir = TempDir::new().expect("temp dir");

    let blank = write_input(&dir, "  \n");
    let failure = execute(&client, create_command(blank, "", ""), false, false)
        .await
        .expect_err("blank content");
    assert_eq!(
        failure,
        CommandFailure {
            action: "Create",
            message: "Content is required".to_string(),
        }
    );

    let input = write_input(&dir, "x");
    let failure = execute(&client, create_command(input, "1.5", ""), false, false)
        .await
        .expect_err("bad ttl");
    assert_eq!(
        failure.to_string(),
        "Create failed: ttl_seconds must be a positive integer (got '1.5')"
    );
    assert_eq!(backend.state().request_count(), 0);
}

#[tokio::test]
async fn get_prints_raw_json_and_reports_backend_errors() {
    let backend = MockBackend::start();
    let client = client_for(&backend);

    let output = execute(&client, Commands::Get { id: "xyz".into() }, false, false)
        .await
        .expect("get");
    let parsed: serde_json::Value = serde_json::from_str(&output).expect("json output");
    assert_eq!(parsed["content"], json!(fixture_content("xyz")));

    let failure = execute(
        &client,
        Commands::Get {
            id: FETCH_MISSING.into(),
        },
        false,
        false,
    )
    .await
    .expect_err("missing");
    assert_eq!(failure.to_string(), "Get failed: Not found");

    let failure = execute(
        &client,
        Commands::Get {
            id: FETCH_HTML_OK.into(),
        },
        false,
        false,
    )
    .await
    .expect_err("html");
    assert!(failure.message.starts_with("Response is not JSON"));
}

#[tokio::test]
async fn health_reports_status_payload() {
    let backend = MockBackend::start();
    let client = client_for(&backend);
    let output = execute(&client, Commands::Health, false, false)
        .await
        .expect("health");
    assert!(output.contains("\"status\": \"ok\""));
}

#[tokio::test]
async fn view_download_writes_named_file() {
    let backend = MockBackend::start();
    let client = client_for(&backend);
    let dir = TempDir::new().expect("temp dir");

    let output = execute(
        &client,
        Commands::View {
            id: "xyz".into(),
            download: Some(dir.path().to_path_buf()),
        },
        false,
        false,
    )
    .await
    .expect("view");
    assert!(output.contains(&fixture_content("xyz")));
    assert!(output.contains("2024-05-01 12:30:00 UTC"));

    let saved = dir.path().join("paste-xyz.txt");
    assert_eq!(
        std::fs::read_to_string(saved).expect("downloaded file"),
        fixture_content("xyz")
    );
}
