//! Backend worker wiring for the native UI.
//!
//! This module exposes the command/event protocol plus the worker spawn helper
//! used by the egui UI thread.

mod protocol;
mod worker;

pub use protocol::{ProbeCmd, ProbeEvent};
pub use worker::{spawn_backend, BackendHandle, REQUEST_LOG_ENV};

#[cfg(test)]
mod tests {
    use super::*;
    use pasteprobe_core::test_support::{
        fixture_content, MockBackend, CREATED_ID, FETCH_HTML_OK, FETCH_MISSING,
    };
    use pasteprobe_core::{ApiClient, ClientConfig, CreatePasteRequest, ProbeError, ViewTicket};
    use std::time::Duration;

    fn recv_event(rx: &crossbeam_channel::Receiver<ProbeEvent>) -> ProbeEvent {
        rx.recv_timeout(Duration::from_secs(5))
            .expect("expected backend event")
    }

    fn spawn_for(server: &MockBackend) -> BackendHandle {
        let config = ClientConfig::default().with_server(Some(server.url()));
        spawn_backend(ApiClient::new(&config).expect("client for mock"))
    }

    #[test]
    fn backend_creates_and_fetches() {
        let server = MockBackend::start();
        let backend = spawn_for(&server);

        backend
            .cmd_tx
            .send(ProbeCmd::Create {
                request: CreatePasteRequest {
                    content: "hello".to_string(),
                    ttl_seconds: Some(30),
                    max_views: None,
                },
            })
            .expect("send create");
        match recv_event(&backend.evt_rx) {
            ProbeEvent::Created { result } => {
                assert_eq!(result.expect("created").id, CREATED_ID);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        backend
            .cmd_tx
            .send(ProbeCmd::Fetch {
                id: CREATED_ID.to_string(),
            })
            .expect("send fetch");
        match recv_event(&backend.evt_rx) {
            ProbeEvent::Fetched { id, result } => {
                assert_eq!(id, CREATED_ID);
                assert_eq!(
                    result.expect("fetched")["content"],
                    serde_json::json!(fixture_content(CREATED_ID))
                );
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn backend_reports_http_and_shape_errors() {
        let server = MockBackend::start();
        let backend = spawn_for(&server);

        backend
            .cmd_tx
            .send(ProbeCmd::Fetch {
                id: FETCH_MISSING.to_string(),
            })
            .expect("send missing");
        match recv_event(&backend.evt_rx) {
            ProbeEvent::Fetched { result, .. } => {
                assert_eq!(result.expect_err("missing").to_string(), "Not found");
            }
            other => panic!("unexpected event: {:?}", other),
        }

        backend
            .cmd_tx
            .send(ProbeCmd::View {
                ticket: ViewTicket {
                    id: FETCH_HTML_OK.to_string(),
                    generation: 1,
                },
            })
            .expect("send view");
        match recv_event(&backend.evt_rx) {
            ProbeEvent::Viewed { ticket, result } => {
                assert_eq!(ticket.generation, 1);
                assert!(matches!(result, Err(ProbeError::Shape(_))));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn failed_event_routes_to_the_commands_slot() {
        let event = ProbeEvent::failed(
            ProbeCmd::Fetch {
                id: "abc".to_string(),
            },
            ProbeError::Transport("offline".to_string()),
        );
        match event {
            ProbeEvent::Fetched { id, result } => {
                assert_eq!(id, "abc");
                assert_eq!(result, Err(ProbeError::Transport("offline".to_string())));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
