//! Development reverse proxy that puts a pastebin backend behind one origin.
//!
//! `/api/*` and `/p/*` are forwarded verbatim; every other path is a JSON 404.

/// Proxy error type and its HTTP mapping.
pub mod error;

pub use error::ProxyError;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Uri},
    response::Response,
    routing::any,
    Router,
};
use pasteprobe_core::config::normalize_server;
use pasteprobe_core::ClientConfig;
use reqwest::Url;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{debug, warn};

pub const BIND_ENV: &str = "PASTEPROBE_PROXY_BIND";
pub const UPSTREAM_ENV: &str = "PASTEPROBE_UPSTREAM";
pub const DEFAULT_PROXY_PORT: u16 = 5173;
/// Largest request body forwarded upstream.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

const FORWARDED_REQUEST_HEADERS: [HeaderName; 2] = [header::CONTENT_TYPE, header::ACCEPT];

/// Listen address and upstream origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub bind: SocketAddr,
    pub upstream: String,
}

impl ProxyConfig {
    /// Read `PASTEPROBE_PROXY_BIND` and `PASTEPROBE_UPSTREAM`.
    ///
    /// The upstream falls back to the client's server setting, so the proxy
    /// and the clients agree on the backend by default.
    pub fn from_env() -> Self {
        let bind = resolve_bind(std::env::var(BIND_ENV).ok());
        let upstream = std::env::var(UPSTREAM_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(normalize_server)
            .unwrap_or_else(|| ClientConfig::from_env().server);
        Self { bind, upstream }
    }

    pub fn with_bind(mut self, bind: Option<SocketAddr>) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }
        self
    }

    pub fn with_upstream(mut self, upstream: Option<String>) -> Self {
        if let Some(upstream) = upstream
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            self.upstream = normalize_server(upstream);
        }
        self
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], DEFAULT_PROXY_PORT))
}

fn resolve_bind(raw: Option<String>) -> SocketAddr {
    let Some(value) = raw else {
        return default_bind();
    };
    match value.trim().parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(err) => {
            warn!(
                "Invalid {}='{}': {}. Falling back to {}",
                BIND_ENV,
                value,
                err,
                default_bind()
            );
            default_bind()
        }
    }
}

/// Shared state passed to the forwarding handler.
#[derive(Clone)]
pub struct ProxyState {
    upstream: Url,
    http: reqwest::Client,
}

impl ProxyState {
    /// Build proxy state for an `http(s)` upstream origin.
    ///
    /// # Errors
    /// Returns [`ProxyError::InvalidUpstream`] when the origin does not parse,
    /// is not `http`/`https`, or the HTTP client cannot be built.
    pub fn new(upstream: &str) -> Result<Self, ProxyError> {
        let invalid = |reason: String| ProxyError::InvalidUpstream {
            url: upstream.to_string(),
            reason,
        };
        let parsed = Url::parse(upstream).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| invalid(err.to_string()))?;
        Ok(Self {
            upstream: parsed,
            http,
        })
    }

    pub fn upstream(&self) -> &Url {
        &self.upstream
    }

    /// Upstream URL for an incoming request URI: same path and query.
    fn target(&self, uri: &Uri) -> Url {
        let mut url = self.upstream.clone();
        url.set_path(uri.path());
        url.set_query(uri.query());
        url
    }
}

async fn forward(
    State(state): State<ProxyState>,
    request: Request,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let target = state.target(&parts.uri);
    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|err| ProxyError::Body(err.to_string()))?;

    let mut outbound = state.http.request(parts.method.clone(), target.clone());
    for name in FORWARDED_REQUEST_HEADERS {
        if let Some(value) = parts.headers.get(&name) {
            outbound = outbound.header(name, value.clone());
        }
    }
    if !body.is_empty() {
        outbound = outbound.body(body);
    }

    let started = Instant::now();
    let upstream = outbound.send().await.map_err(|err| {
        warn!(method = %parts.method, target = %target, "upstream request failed: {}", err);
        ProxyError::Upstream(err.to_string())
    })?;
    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|err| ProxyError::Upstream(err.to_string()))?;
    debug!(
        method = %parts.method,
        target = %target,
        status = status.as_u16(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "proxied request"
    );

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}

async fn not_found() -> ProxyError {
    ProxyError::NotFound
}

/// Create the proxy router.
///
/// # Returns
/// Configured `axum::Router` forwarding `/api/*` and `/p/*` to the upstream.
pub fn create_app(state: ProxyState) -> Router {
    Router::new()
        .route("/api/*path", any(forward))
        .route("/p/*path", any(forward))
        .fallback(not_found)
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::VIA,
                    HeaderValue::from_static("1.1 pasteprobe-proxy"),
                )),
        )
}

/// Run the proxy with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: ProxyState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasteprobe_core::config::SERVER_ENV;
    use pasteprobe_core::env::{env_lock, EnvOverride};

    #[test]
    fn resolve_bind_matrix() {
        let cases = [
            (None, default_bind()),
            (Some("0.0.0.0:9000"), SocketAddr::from(([0, 0, 0, 0], 9000))),
            (Some(" 127.0.0.1:8080 "), SocketAddr::from(([127, 0, 0, 1], 8080))),
            (Some("not-an-address"), default_bind()),
        ];
        for (raw, expected) in cases {
            assert_eq!(resolve_bind(raw.map(str::to_string)), expected, "{:?}", raw);
        }
    }

    #[test]
    fn config_reads_env_and_flags_override() {
        let _lock = env_lock().lock().expect("env lock");
        let _bind = EnvOverride::set(BIND_ENV, "127.0.0.1:6000");
        let _upstream = EnvOverride::remove(UPSTREAM_ENV);
        let _server = EnvOverride::set(SERVER_ENV, "http://localhost:9999/");

        let config = ProxyConfig::from_env();
        assert_eq!(config.bind, SocketAddr::from(([127, 0, 0, 1], 6000)));
        assert_eq!(config.upstream, "http://127.0.0.1:9999");

        let config = config
            .with_bind(Some(SocketAddr::from(([127, 0, 0, 1], 7000))))
            .with_upstream(Some("http://backend.test:8787/".to_string()));
        assert_eq!(config.bind.port(), 7000);
        assert_eq!(config.upstream, "http://backend.test:8787");
    }

    #[test]
    fn state_rejects_non_http_upstreams() {
        assert!(ProxyState::new("http://127.0.0.1:8787").is_ok());
        assert!(matches!(
            ProxyState::new("ftp://127.0.0.1"),
            Err(ProxyError::InvalidUpstream { .. })
        ));
        assert!(matches!(
            ProxyState::new("not a url"),
            Err(ProxyError::InvalidUpstream { .. })
        ));
    }

    #[test]
    fn target_keeps_path_and_query() {
        let state = ProxyState::new("http://127.0.0.1:8787").expect("state");
        let uri: Uri = "/api/pastes/a%2Fb?x=1".parse().expect("uri");
        assert_eq!(
            state.target(&uri).as_str(),
            "http://127.0.0.1:8787/api/pastes/a%2Fb?x=1"
        );
        let uri: Uri = "/p/xyz".parse().expect("uri");
        assert_eq!(state.target(&uri).as_str(), "http://127.0.0.1:8787/p/xyz");
    }
}
