//! Panel state transitions and slot independence.

use super::*;
use crate::error::ValidationError;
use reqwest::Url;
use serde_json::json;

fn created(id: &str) -> CreatedPaste {
    CreatedPaste {
        id: id.to_string(),
        payload: json!({ "id": id }),
        view_url: Url::parse(&format!("http://127.0.0.1:8787/p/{}", id)).expect("url"),
        api_url: Url::parse(&format!("http://127.0.0.1:8787/api/pastes/{}", id)).expect("url"),
    }
}

#[test]
fn blank_content_sets_validation_error_without_claiming() {
    let mut panel = Panel::new();
    panel.draft.content = "   ".to_string();

    let err = panel.begin_create().expect_err("blank content");
    assert_eq!(err, ProbeError::Validation(ValidationError::EmptyContent));
    assert_eq!(panel.create_outcome().error(), Some("Content is required"));
    assert!(!panel.is_busy(), "no request may be in flight");
}

#[test]
fn malformed_numbers_are_rejected_before_sending() {
    for bad in ["0", "-1", "1.5", "abc"] {
        let mut panel = Panel::new();
        panel.draft = PasteDraft {
            content: "hello".to_string(),
            ttl_seconds: bad.to_string(),
            max_views: String::new(),
        };
        assert!(
            matches!(panel.begin_create(), Err(ProbeError::Validation(_))),
            "ttl: {}",
            bad
        );
        assert!(!panel.is_busy());
        assert_eq!(panel.draft.content, "hello", "draft kept for correction");
    }
}

#[test]
fn successful_create_fills_fetch_id_and_discards_draft() {
    let mut panel = Panel::new();
    panel.draft = PasteDraft::new("hello");
    panel.fetch_id = "old".to_string();

    let request = panel.begin_create().expect("valid draft");
    assert_eq!(request.content, "hello");
    assert_eq!(panel.active(), Some(ActionKind::Create));
    assert!(panel.create_outcome().is_loading());

    panel.finish_create(Ok(created("abc123")));
    assert!(!panel.is_busy());
    assert_eq!(panel.fetch_id, "abc123");
    assert_eq!(
        panel.create_outcome().success().map(|c| c.id.as_str()),
        Some("abc123")
    );
    assert!(panel.draft.is_blank());
}

#[test]
fn failed_create_keeps_draft_and_fetch_id() {
    let mut panel = Panel::new();
    panel.draft = PasteDraft::new("hello");
    panel.fetch_id = "keep".to_string();
    panel.begin_create().expect("valid draft");

    panel.finish_create(Err(ProbeError::Http {
        status: 500,
        message: "HTTP 500: boom".to_string(),
    }));
    assert_eq!(panel.create_outcome().error(), Some("HTTP 500: boom"));
    assert_eq!(panel.fetch_id, "keep");
    assert_eq!(panel.draft.content, "hello");
}

#[test]
fn fetch_requires_an_identifier() {
    let mut panel = Panel::new();
    panel.fetch_id = "  ".to_string();
    assert_eq!(
        panel.begin_fetch(),
        Err(ProbeError::Validation(ValidationError::EmptyIdentifier))
    );
    assert_eq!(panel.fetch_outcome().error(), Some("Paste id is required"));

    panel.fetch_id = " abc ".to_string();
    assert_eq!(panel.begin_fetch().as_deref(), Ok("abc"));
}

#[test]
fn only_one_action_may_be_in_flight() {
    let mut panel = Panel::new();
    panel.fetch_id = "abc".to_string();
    panel.begin_fetch().expect("fetch starts");

    assert_eq!(
        panel.begin_health(),
        Err(ProbeError::Busy(ActionKind::Fetch))
    );
    panel.draft = PasteDraft::new("x");
    assert_eq!(
        panel.begin_create(),
        Err(ProbeError::Busy(ActionKind::Fetch))
    );
    assert!(panel.health_outcome().is_idle(), "busy rejection leaves slots alone");
    assert!(panel.create_outcome().is_idle());

    panel.finish_fetch(Ok(json!({ "id": "abc" })));
    assert!(panel.begin_health().is_ok());
}

#[test]
fn health_failure_never_clears_fetch_success() {
    let mut panel = Panel::new();
    panel.fetch_id = "abc".to_string();
    panel.begin_fetch().expect("fetch");
    panel.finish_fetch(Ok(json!({ "id": "abc", "content": "hi" })));

    panel.begin_health().expect("health");
    panel.finish_health(Err(ProbeError::Transport("connection refused".to_string())));

    assert_eq!(
        panel.fetch_outcome().success(),
        Some(&json!({ "id": "abc", "content": "hi" }))
    );
    assert_eq!(
        panel.health_outcome().error(),
        Some("Request failed: connection refused")
    );
}

#[test]
fn fetch_failure_never_clears_health_success() {
    let mut panel = Panel::new();
    panel.begin_health().expect("health");
    panel.finish_health(Ok(json!({ "ok": true })));

    panel.fetch_id = "missing".to_string();
    panel.begin_fetch().expect("fetch");
    panel.finish_fetch(Err(ProbeError::Http {
        status: 404,
        message: "Not found".to_string(),
    }));

    assert_eq!(panel.health_outcome().success(), Some(&json!({ "ok": true })));
    assert_eq!(panel.fetch_outcome().error(), Some("Not found"));
}

#[test]
fn refetch_overwrites_only_its_own_slot() {
    let mut panel = Panel::new();
    panel.begin_health().expect("health");
    panel.finish_health(Ok(json!({ "ok": true })));

    panel.fetch_id = "abc".to_string();
    panel.begin_fetch().expect("fetch");
    panel.finish_fetch(Ok(json!({ "id": "abc" })));
    panel.begin_fetch().expect("refetch");
    assert!(panel.fetch_outcome().is_loading());
    assert!(panel.health_outcome().success().is_some());
}

#[test]
fn html_response_after_a_success_leaves_no_fetch_success() {
    let mut panel = Panel::new();
    panel.fetch_id = "abc".to_string();
    panel.begin_fetch().expect("fetch");
    panel.finish_fetch(Ok(json!({ "id": "abc", "content": "hi" })));
    assert!(panel.fetch_outcome().success().is_some());

    panel.begin_fetch().expect("refetch");
    panel.finish_fetch(Err(ProbeError::Shape("Expected JSON but got text/html".to_string())));
    assert_eq!(panel.fetch_outcome().success(), None);
    assert_eq!(
        panel.fetch_outcome().error(),
        Some("Expected JSON but got text/html")
    );
    assert!(!panel.is_busy());
}

#[test]
fn clear_draft_resets_form_and_create_slot() {
    let mut panel = Panel::new();
    panel.draft = PasteDraft {
        content: " ".to_string(),
        ttl_seconds: "5".to_string(),
        max_views: "2".to_string(),
    };
    let _ = panel.begin_create();
    assert!(panel.create_outcome().error().is_some());

    panel.clear_draft();
    assert!(panel.draft.is_blank());
    assert!(panel.create_outcome().is_idle());
}
