//! HTTP client for the pastebin API (create, fetch, health).

use crate::config::ClientConfig;
use crate::constants::{
    API_SEGMENT, CREATE_FALLBACK_MESSAGE, FETCH_FALLBACK_MESSAGE, HEALTH_FALLBACK_MESSAGE,
    HEALTH_SEGMENT, PASTES_SEGMENT, VIEW_SEGMENT,
};
use crate::decode::{decode_response, failure_message, DecodedBody};
use crate::draft::validate_identifier;
use crate::error::ProbeError;
use crate::models::{created_id, CreatePasteRequest, CreatedPaste, PasteRecord};
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};

/// Client bound to one backend base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be built or the server URL
    /// cannot serve as an API base.
    pub fn new(config: &ClientConfig) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Self::with_http(&config.server, http)
    }

    /// Build a client around an existing `reqwest::Client`.
    ///
    /// # Errors
    /// Returns [`ProbeError::InvalidServer`] for unparsable or non-base URLs.
    pub fn with_http(server: &str, http: reqwest::Client) -> Result<Self, ProbeError> {
        let base = parse_base(server)?;
        Ok(Self { base, http })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `POST /api/pastes` target.
    pub fn create_url(&self) -> Url {
        self.join(&[API_SEGMENT, PASTES_SEGMENT])
    }

    /// JSON resource of a paste; `id` is percent-encoded as one segment.
    pub fn paste_api_url(&self, id: &str) -> Url {
        self.join(&[API_SEGMENT, PASTES_SEGMENT, id])
    }

    /// Server-rendered HTML page of a paste.
    pub fn view_url(&self, id: &str) -> Url {
        self.join(&[VIEW_SEGMENT, id])
    }

    pub fn health_url(&self) -> Url {
        self.join(&[API_SEGMENT, HEALTH_SEGMENT])
    }

    fn join(&self, segments: &[&str]) -> Url {
        // `parse_base` already rejected cannot-be-a-base URLs.
        api_url(&self.base, segments).unwrap_or_else(|_| self.base.clone())
    }

    /// Create a paste from a validated request.
    ///
    /// # Returns
    /// The full response payload, the new id, and the derived view/API links.
    ///
    /// # Errors
    /// - [`ProbeError::Http`] for non-2xx responses.
    /// - [`ProbeError::Shape`] when a 2xx body is not JSON or has no `id`.
    /// - [`ProbeError::Transport`] for connection or timeout failures.
    pub async fn create_paste(
        &self,
        request: &CreatePasteRequest,
    ) -> Result<CreatedPaste, ProbeError> {
        let url = self.create_url();
        let body = self
            .send("create", self.http.post(url.clone()).json(request), &url)
            .await?;
        let payload = interpret_json(body, CREATE_FALLBACK_MESSAGE)?;
        let id = created_id(&payload)?;
        Ok(CreatedPaste {
            view_url: self.view_url(&id),
            api_url: self.paste_api_url(&id),
            id,
            payload,
        })
    }

    /// Fetch a paste as raw JSON.
    ///
    /// # Errors
    /// - [`ProbeError::Validation`] for a blank id (no request is sent).
    /// - [`ProbeError::Http`] carrying the backend `error` text, or a message
    ///   built from the status and raw body (`"Not found"` when empty).
    /// - [`ProbeError::Shape`] when a 2xx body is not JSON.
    pub async fn fetch_paste(&self, id: &str) -> Result<Value, ProbeError> {
        let id = validate_identifier(id)?;
        let url = self.paste_api_url(&id);
        let body = self.send("fetch", self.http.get(url.clone()), &url).await?;
        interpret_json(body, FETCH_FALLBACK_MESSAGE)
    }

    /// Fetch a paste and decode it into a [`PasteRecord`].
    ///
    /// # Errors
    /// Same as [`ApiClient::fetch_paste`], plus [`ProbeError::Shape`] when the
    /// JSON does not look like a paste.
    pub async fn fetch_record(&self, id: &str) -> Result<PasteRecord, ProbeError> {
        let value = self.fetch_paste(id).await?;
        PasteRecord::from_value(value)
    }

    /// Check the backend health endpoint.
    ///
    /// # Errors
    /// Same contract as [`ApiClient::fetch_paste`], with fallback text
    /// `"Health check failed"`.
    pub async fn health(&self) -> Result<Value, ProbeError> {
        let url = self.health_url();
        let body = self.send("health", self.http.get(url.clone()), &url).await?;
        interpret_json(body, HEALTH_FALLBACK_MESSAGE)
    }

    async fn send(
        &self,
        action: &'static str,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<DecodedBody, ProbeError> {
        let started = Instant::now();
        let response = request.send().await.map_err(|err| {
            warn!(action, url = %url, error = %err, "request failed");
            ProbeError::from(err)
        })?;
        let body = decode_response(response).await?;
        debug!(
            action,
            url = %url,
            status = body.status.as_u16(),
            json = body.json.is_some(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "request completed"
        );
        Ok(body)
    }
}

/// Apply the shared success contract: 2xx status AND a JSON body.
///
/// # Errors
/// [`ProbeError::Http`] for non-2xx (message per [`failure_message`]),
/// [`ProbeError::Shape`] for a 2xx body that is not JSON.
pub fn interpret_json(body: DecodedBody, fallback: &str) -> Result<Value, ProbeError> {
    if !body.is_success() {
        return Err(ProbeError::Http {
            status: body.status.as_u16(),
            message: failure_message(&body, fallback),
        });
    }
    let preview = body.preview();
    body.json.ok_or_else(|| {
        if preview.is_empty() {
            ProbeError::Shape("Response body was empty".to_string())
        } else {
            ProbeError::Shape(format!("Response is not JSON: {}", preview))
        }
    })
}

/// Append path segments to a base URL, percent-encoding each one.
///
/// # Errors
/// Returns [`ProbeError::InvalidServer`] when the URL cannot carry a path.
pub fn api_url(base: &Url, segments: &[&str]) -> Result<Url, ProbeError> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| ProbeError::InvalidServer {
            url: base.to_string(),
            reason: "URL cannot be used as an API base".to_string(),
        })?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

fn parse_base(server: &str) -> Result<Url, ProbeError> {
    let url = Url::parse(server.trim()).map_err(|err| ProbeError::InvalidServer {
        url: server.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ProbeError::InvalidServer {
            url: server.to_string(),
            reason: "expected an http(s) base URL".to_string(),
        });
    }
    Ok(url)
}
