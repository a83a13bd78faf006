//! Command-line client for exercising a pastebin API.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use pasteprobe_core::viewer::write_download;
use pasteprobe_core::{ApiClient, ClientConfig, CreatedPaste, PasteDraft, PasteRecord, ProbeError};
use serde_json::Value;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pprobe", about = "PasteProbe pastebin test client", version)]
struct Cli {
    /// Server URL (can also be set via PASTEPROBE_SERVER env var)
    #[arg(short, long, env = "PASTEPROBE_SERVER")]
    server: Option<String>,

    /// Print raw JSON responses
    #[arg(short, long, global = true)]
    json: bool,

    /// Print timing for API requests
    #[arg(long, global = true)]
    timing: bool,

    /// Request timeout in seconds (defaults to PASTEPROBE_TIMEOUT_SECS or 30)
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Create a paste from a file, or stdin when no file is given
    Create {
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Expiry in seconds (positive integer)
        #[arg(long, default_value = "")]
        ttl: String,
        /// Maximum number of views (positive integer)
        #[arg(long, default_value = "")]
        max_views: String,
    },
    /// Fetch a paste and print the raw JSON response
    Get { id: String },
    /// Check the health endpoint
    Health,
    /// Show a paste's content and metadata, optionally saving it to a directory
    View {
        id: String,
        /// Directory to write `paste-<id>.txt` into
        #[arg(short, long)]
        download: Option<PathBuf>,
    },
}

/// A failed command: the action label plus the message printed to stderr.
#[derive(Debug, PartialEq, Eq)]
struct CommandFailure {
    action: &'static str,
    message: String,
}

impl CommandFailure {
    fn new(action: &'static str, message: impl fmt::Display) -> Self {
        Self {
            action,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.action, self.message)
    }
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn pretty_json(value: &Value) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("response encoding error: {}", err))
}

fn format_created(created: &CreatedPaste, json: bool) -> Result<String, String> {
    if json {
        return pretty_json(&created.payload);
    }
    Ok(format!(
        "Created: {}\nView:    {}\nAPI:     {}",
        created.id, created.view_url, created.api_url
    ))
}

fn format_view(record: &PasteRecord, json: bool) -> Result<String, String> {
    if json {
        let value = serde_json::to_value(record)
            .map_err(|err| format!("response encoding error: {}", err))?;
        return pretty_json(&value);
    }
    let width = record
        .metadata_rows()
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (label, value) in record.metadata_rows() {
        out.push_str(&format!("{:<width$}  {}\n", label, value, width = width));
    }
    out.push('\n');
    out.push_str(&record.content);
    Ok(out)
}

fn read_content(file: Option<PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Run one command and return what should be printed to stdout.
async fn execute(
    client: &ApiClient,
    command: Commands,
    json: bool,
    timing: bool,
) -> Result<String, CommandFailure> {
    match command {
        Commands::Completions { .. } => {
            unreachable!("completions handled before client setup")
        }
        Commands::Create {
            file,
            ttl,
            max_views,
        } => {
            let content = read_content(file).map_err(|err| CommandFailure::new("Create", err))?;
            let draft = PasteDraft {
                content,
                ttl_seconds: ttl,
                max_views,
            };
            let request = draft
                .validate()
                .map_err(|err| CommandFailure::new("Create", ProbeError::from(err)))?;
            let started = Instant::now();
            let created = client
                .create_paste(&request)
                .await
                .map_err(|err| CommandFailure::new("Create", err))?;
            log_timing(timing, "create", started.elapsed());
            format_created(&created, json).map_err(|err| CommandFailure::new("Create", err))
        }
        Commands::Get { id } => {
            let started = Instant::now();
            let value = client
                .fetch_paste(&id)
                .await
                .map_err(|err| CommandFailure::new("Get", err))?;
            log_timing(timing, "get", started.elapsed());
            pretty_json(&value).map_err(|err| CommandFailure::new("Get", err))
        }
        Commands::Health => {
            let started = Instant::now();
            let value = client
                .health()
                .await
                .map_err(|err| CommandFailure::new("Health", err))?;
            log_timing(timing, "health", started.elapsed());
            pretty_json(&value).map_err(|err| CommandFailure::new("Health", err))
        }
        Commands::View { id, download } => {
            let started = Instant::now();
            let record = client
                .fetch_record(&id)
                .await
                .map_err(|err| CommandFailure::new("View", err))?;
            log_timing(timing, "view", started.elapsed());
            let mut output =
                format_view(&record, json).map_err(|err| CommandFailure::new("View", err))?;
            if let Some(dir) = download {
                let path = write_download(&dir, &record.id, &record.content)
                    .map_err(|err| CommandFailure::new("Download", err))?;
                eprintln!("Saved {}", path.display());
                if !json {
                    output.push_str(&format!("\n\n(saved to {})", path.display()));
                }
            }
            Ok(output)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        server,
        json,
        timing,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    init_tracing();

    let mut config = ClientConfig::from_env().with_server(server);
    if let Some(secs) = timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = ApiClient::new(&config)?;
    tracing::debug!(
        server = %client.base(),
        timeout_secs = config.timeout.as_secs(),
        "pprobe configured"
    );

    match execute(&client, command, json, timing).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        Err(failure) => {
            eprintln!("{}", failure);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests;
