//! Backend worker flows against the mock backend, without opening a window.

use crossbeam_channel::Receiver;
use pasteprobe_core::test_support::{fixture_content, MockBackend, CREATED_ID, SLOW_PREFIX};
use pasteprobe_core::{ApiClient, ClientConfig, Panel, PasteDraft, Viewer};
use pasteprobe_gui::backend::{spawn_backend, BackendHandle, ProbeCmd, ProbeEvent};
use std::time::Duration;

fn recv_event(rx: &Receiver<ProbeEvent>) -> ProbeEvent {
    rx.recv_timeout(Duration::from_secs(5))
        .expect("expected backend event")
}

fn spawn_for(server: &MockBackend) -> BackendHandle {
    let config = ClientConfig::default().with_server(Some(server.url()));
    spawn_backend(ApiClient::new(&config).expect("client for mock"))
}

#[test]
fn panel_create_then_fetch_through_worker() {
    let server = MockBackend::start();
    let backend = spawn_for(&server);
    let mut panel = Panel::new();

    panel.draft = PasteDraft {
        content: "hello".to_string(),
        ttl_seconds: String::new(),
        max_views: "2".to_string(),
    };
    let request = panel.begin_create().expect("valid draft");
    backend
        .cmd_tx
        .send(ProbeCmd::Create { request })
        .expect("send create");
    match recv_event(&backend.evt_rx) {
        ProbeEvent::Created { result } => panel.finish_create(result),
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(panel.fetch_id, CREATED_ID);

    let id = panel.begin_fetch().expect("fetch id");
    backend
        .cmd_tx
        .send(ProbeCmd::Fetch { id })
        .expect("send fetch");
    match recv_event(&backend.evt_rx) {
        ProbeEvent::Fetched { result, .. } => panel.finish_fetch(result),
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(
        panel.fetch_outcome().success().map(|v| v["content"].clone()),
        Some(serde_json::json!(fixture_content(CREATED_ID)))
    );
    assert_eq!(
        server.state().created_bodies(),
        vec![serde_json::json!({ "content": "hello", "max_views": 2 })]
    );
}

#[test]
fn slow_viewer_response_does_not_overwrite_newer_one() {
    let server = MockBackend::start();
    let backend = spawn_for(&server);
    let mut viewer = Viewer::new();

    let slow_id = format!("{}first", SLOW_PREFIX);
    let stale = viewer.navigate(&slow_id).expect("first ticket");
    backend
        .cmd_tx
        .send(ProbeCmd::View { ticket: stale })
        .expect("send slow view");
    let current = viewer.navigate("second").expect("second ticket");
    backend
        .cmd_tx
        .send(ProbeCmd::View { ticket: current })
        .expect("send fast view");

    let mut applied = Vec::new();
    for _ in 0..2 {
        match recv_event(&backend.evt_rx) {
            ProbeEvent::Viewed { ticket, result } => {
                applied.push((ticket.id.clone(), viewer.commit(&ticket, result)));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    assert_eq!(
        applied,
        vec![("second".to_string(), true), (slow_id, false)],
        "fast response arrives first; the slow one is discarded"
    );
    assert_eq!(
        viewer.state().success().map(|r| r.content.clone()),
        Some(fixture_content("second"))
    );
}

#[test]
fn health_failure_leaves_fetch_slot_intact() {
    let server = MockBackend::start();
    let backend = spawn_for(&server);
    let mut panel = Panel::new();

    panel.fetch_id = "xyz".to_string();
    let id = panel.begin_fetch().expect("fetch id");
    backend
        .cmd_tx
        .send(ProbeCmd::Fetch { id })
        .expect("send fetch");
    match recv_event(&backend.evt_rx) {
        ProbeEvent::Fetched { result, .. } => panel.finish_fetch(result),
        other => panic!("unexpected event: {:?}", other),
    }

    server.state().set_healthy(false);
    panel.begin_health().expect("health");
    backend.cmd_tx.send(ProbeCmd::Health).expect("send health");
    match recv_event(&backend.evt_rx) {
        ProbeEvent::Health { result } => panel.finish_health(result),
        other => panic!("unexpected event: {:?}", other),
    }

    assert!(panel.health_outcome().error().is_some());
    assert!(panel.fetch_outcome().success().is_some());
}
