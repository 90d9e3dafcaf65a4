use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use promptshare_api::*;

use crate::error::ApiError;

/// Typed HTTP client for the promptshare API.
///
/// Provides one method per endpoint. The stored auth token is attached as a
/// Bearer header when present; mutating endpoints refuse to run without one.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a new client with the given base URL and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    pub fn set_auth(&mut self, token: String) {
        self.auth_token = Some(token);
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn token_or_err(&self) -> Result<&str, ApiError> {
        self.auth_token.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    fn maybe_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    // ── Health ──────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let resp = self.client.get(self.url("/health")).send().await?;
        parse_flat(resp).await
    }

    // ── Auth ────────────────────────────────────────────────────────────

    pub async fn login(&self, req: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(req)
            .send()
            .await?;
        parse_flat(resp).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        let resp = self
            .client
            .post(self.url("/auth/register"))
            .json(req)
            .send()
            .await?;
        parse_flat(resp).await
    }

    // ── Prompts ─────────────────────────────────────────────────────────

    pub async fn list_prompts(&self, query: &PromptListQuery) -> Result<Page<Prompt>, ApiError> {
        let url = format!("{}?{}", self.url("/prompts"), prompts_query(query));
        let resp = self.maybe_auth(self.client.get(&url)).send().await?;
        parse_envelope(resp).await
    }

    pub async fn create_prompt(&self, draft: &PromptDraft) -> Result<Prompt, ApiError> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .post(self.url("/prompts"))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        parse_envelope(resp).await
    }

    pub async fn update_prompt(&self, id: i64, draft: &PromptDraft) -> Result<Prompt, ApiError> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .put(self.url(&format!("/prompts/{id}")))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        parse_envelope(resp).await
    }

    /// Replace the image set attached to a prompt.
    pub async fn set_prompt_images(
        &self,
        prompt_id: i64,
        images: &[PromptImage],
    ) -> Result<(), ApiError> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .post(self.url(&format!("/prompts/{prompt_id}/images")))
            .bearer_auth(token)
            .json(&images)
            .send()
            .await?;
        parse_ack(resp).await
    }

    // ── Files ───────────────────────────────────────────────────────────

    pub async fn list_files(&self, query: &FileListQuery) -> Result<Page<StoredFile>, ApiError> {
        let url = format!("{}?{}", self.url("/files"), files_query(query));
        let resp = self.maybe_auth(self.client.get(&url)).send().await?;
        parse_envelope(resp).await
    }

    /// Upload one file as a `multipart/form-data` request (field `file`).
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<StoredFile, ApiError> {
        let token = self.token_or_err()?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let resp = self
            .client
            .post(self.url("/files/upload"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        parse_envelope(resp).await
    }

    pub async fn download_file(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        let resp = self
            .maybe_auth(self.client.get(self.download_url(id)))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(server_error(status, &body));
        }
        Ok(resp.bytes().await?.to_vec())
    }

    pub fn preview_url(&self, id: i64) -> String {
        self.url(&format!("/files/preview/{id}"))
    }

    pub fn thumbnail_url(&self, id: i64) -> String {
        self.url(&format!("/files/thumbnail/{id}"))
    }

    pub fn download_url(&self, id: i64) -> String {
        self.url(&format!("/files/download/{id}"))
    }
}

// ── Query strings ───────────────────────────────────────────────────────

fn prompts_query(query: &PromptListQuery) -> String {
    let mut params = vec![format!("page={}", query.page), format!("size={}", query.size)];
    if let Some(q) = query.q.as_deref() {
        if !q.is_empty() {
            params.push(format!("q={}", urlencoding::encode(q)));
        }
    }
    params.join("&")
}

fn files_query(query: &FileListQuery) -> String {
    format!("page={}&size={}", query.page, query.size)
}

// ── Response decoding ───────────────────────────────────────────────────

/// Decode an enveloped body: 2xx + `code == 0` + present `data`.
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(server_error(status, body));
    }
    let env: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !env.is_success() {
        return Err(ApiError::Server {
            status: status.as_u16(),
            code: Some(env.code),
            message: env.message,
        });
    }
    env.data
        .ok_or_else(|| ApiError::Decode("envelope data missing".to_string()))
}

/// Decode a flat (non-enveloped) 2xx body.
fn decode_flat<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(server_error(status, body));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode an enveloped body whose `data` is irrelevant (may be absent).
fn decode_ack(status: StatusCode, body: &str) -> Result<(), ApiError> {
    if !status.is_success() {
        return Err(server_error(status, body));
    }
    let env: Envelope<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !env.is_success() {
        return Err(ApiError::Server {
            status: status.as_u16(),
            code: Some(env.code),
            message: env.message,
        });
    }
    Ok(())
}

/// Classify a failure body: prefer the envelope's code/message, fall back
/// to a snippet of the raw text.
fn server_error(status: StatusCode, body: &str) -> ApiError {
    if let Ok(env) = serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        let message = if env.message.is_empty() {
            status.to_string()
        } else {
            env.message
        };
        return ApiError::Server {
            status: status.as_u16(),
            code: Some(env.code),
            message,
        };
    }
    let text = snippet(body);
    ApiError::Server {
        status: status.as_u16(),
        code: None,
        message: if text.is_empty() {
            status.to_string()
        } else {
            text
        },
    }
}

/// First 200 characters of a body, for error text that may be HTML.
fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= 200 {
        trimmed.to_string()
    } else {
        let mut cut: String = trimmed.chars().take(200).collect();
        cut.push('…');
        cut
    }
}

async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;
    decode_envelope(status, &body)
}

async fn parse_flat<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;
    decode_flat(status, &body)
}

async fn parse_ack(resp: reqwest::Response) -> Result<(), ApiError> {
    let status = resp.status();
    let body = resp.text().await?;
    decode_ack(status, &body)
}
