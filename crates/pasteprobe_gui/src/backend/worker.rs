//! Background worker thread for HTTP access.

use crate::backend::{ProbeCmd, ProbeEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use pasteprobe_core::config::env_flag_enabled;
use pasteprobe_core::{ApiClient, ProbeError};
use std::thread;
use std::time::Instant;
use tracing::{error, info};

/// Enables an info log line per completed request.
pub const REQUEST_LOG_ENV: &str = "PASTEPROBE_REQUEST_LOG";

/// Handle for sending commands to, and receiving events from, the backend worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<ProbeCmd>,
    pub evt_rx: Receiver<ProbeEvent>,
}

fn command_label(cmd: &ProbeCmd) -> &'static str {
    match cmd {
        ProbeCmd::Create { .. } => "create",
        ProbeCmd::Fetch { .. } => "fetch",
        ProbeCmd::Health => "health",
        ProbeCmd::View { .. } => "view",
    }
}

async fn run_command(client: &ApiClient, cmd: ProbeCmd) -> ProbeEvent {
    match cmd {
        ProbeCmd::Create { request } => ProbeEvent::Created {
            result: client.create_paste(&request).await,
        },
        ProbeCmd::Fetch { id } => {
            let result = client.fetch_paste(&id).await;
            ProbeEvent::Fetched { id, result }
        }
        ProbeCmd::Health => ProbeEvent::Health {
            result: client.health().await,
        },
        ProbeCmd::View { ticket } => {
            let result = client.fetch_record(&ticket.id).await;
            ProbeEvent::Viewed { ticket, result }
        }
    }
}

fn event_failed(event: &ProbeEvent) -> bool {
    match event {
        ProbeEvent::Created { result } => result.is_err(),
        ProbeEvent::Fetched { result, .. } | ProbeEvent::Health { result } => result.is_err(),
        ProbeEvent::Viewed { result, .. } => result.is_err(),
    }
}

/// Spawn the backend worker that performs HTTP requests off the UI thread.
///
/// Each command runs as its own task, so a slow request never delays an
/// unrelated one; events are sent as responses complete. The worker exits
/// when every command sender is dropped.
///
/// # Returns
/// A [`BackendHandle`] containing the command sender and event receiver.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_backend(client: ApiClient) -> BackendHandle {
    let (cmd_tx, cmd_rx) = unbounded::<ProbeCmd>();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("pasteprobe-gui-backend".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .thread_name("pasteprobe-http")
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    error!("failed to start backend runtime: {}", err);
                    let message = format!("backend runtime unavailable: {}", err);
                    for cmd in cmd_rx.iter() {
                        let event = ProbeEvent::failed(cmd, ProbeError::Transport(message.clone()));
                        let _ = evt_tx.send(event);
                    }
                    return;
                }
            };
            let request_log = env_flag_enabled(REQUEST_LOG_ENV);

            for cmd in cmd_rx.iter() {
                let client = client.clone();
                let evt_tx = evt_tx.clone();
                rt.spawn(async move {
                    let label = command_label(&cmd);
                    let started = Instant::now();
                    let event = run_command(&client, cmd).await;
                    if request_log {
                        info!(
                            target: "pasteprobe_gui::requests",
                            op = label,
                            failed = event_failed(&event),
                            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                            "backend request finished"
                        );
                    }
                    let _ = evt_tx.send(event);
                });
            }
        })
        .expect("failed to spawn backend worker");

    BackendHandle { cmd_tx, evt_rx }
}
