//! Shared API types for the promptshare backend contract.
//!
//! This crate is the single source of truth for request/response shapes.
//! Data endpoints wrap their payloads in an [`Envelope`]; the auth endpoints
//! return flat bodies. List endpoints return a [`Page`].

use serde::{Deserialize, Serialize};

// Re-export core domain types for convenience
pub use promptshare_core::{Prompt, PromptImage, StoredFile};

/// Envelope `code` value meaning success.
pub const ENVELOPE_OK: i64 = 0;

/// `{code, message, data}` wrapper used by all data endpoints.
///
/// A non-zero `code` is a server-reported failure even under HTTP 200;
/// `data` may be absent on failures.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == ENVELOPE_OK
    }
}

/// One page of a paginated listing.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    #[serde(default)]
    pub total: i64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

// ─── Auth ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Flat body returned by `/auth/login` and `/auth/register`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// ─── Prompts ─────────────────────────────────────────────────────────────

/// Query for `GET /prompts`. `q` is omitted from the request when empty.
#[derive(Debug, Clone)]
pub struct PromptListQuery {
    pub page: u32,
    pub size: u32,
    pub q: Option<String>,
}

impl Default for PromptListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
            q: None,
        }
    }
}

/// Fields accepted by prompt create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_tags: Option<String>,
}

// ─── Files ───────────────────────────────────────────────────────────────

/// Query for `GET /files`.
#[derive(Debug, Clone)]
pub struct FileListQuery {
    pub page: u32,
    pub size: u32,
}

impl Default for FileListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

// ─── Health ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: String,
}

// ─── Defaults ────────────────────────────────────────────────────────────

fn default_page() -> u32 {
    1
}
fn default_size() -> u32 {
    promptshare_core::feed::DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_parses_success_with_data() {
        let env: Envelope<Page<Prompt>> = serde_json::from_str(
            r#"{
                "code": 0,
                "message": "ok",
                "data": {
                    "list": [{"id": 1, "title": "One", "content": "body"}],
                    "total": 1,
                    "page": 1,
                    "size": 9
                }
            }"#,
        )
        .unwrap();
        assert!(env.is_success());
        let page = env.data.unwrap();
        assert_eq!(page.list.len(), 1);
        assert_eq!(page.list[0].title, "One");
        assert_eq!(page.size, 9);
    }

    #[test]
    fn envelope_parses_failure_without_data() {
        let env: Envelope<Page<Prompt>> =
            serde_json::from_str(r#"{"code": 1102, "message": "token expired"}"#).unwrap();
        assert!(!env.is_success());
        assert_eq!(env.code, 1102);
        assert_eq!(env.message, "token expired");
        assert!(env.data.is_none());
    }

    #[test]
    fn page_defaults_fill_missing_cursor_fields() {
        let page: Page<StoredFile> = serde_json::from_str(r#"{"list": []}"#).unwrap();
        assert!(page.list.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 9);
    }

    #[test]
    fn prompt_draft_omits_unset_optional_fields() {
        let draft = PromptDraft {
            title: "T".to_string(),
            content: "C".to_string(),
            ..PromptDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["title"], "T");
        assert!(json.get("tags").is_none());
        assert!(json.get("source_url").is_none());
    }

    #[test]
    fn default_queries_start_at_page_one() {
        let q = PromptListQuery::default();
        assert_eq!((q.page, q.size), (1, 9));
        assert!(q.q.is_none());
        let f = FileListQuery::default();
        assert_eq!((f.page, f.size), (1, 9));
    }

    #[test]
    fn token_response_parses_flat_body() {
        let tok: TokenResponse = serde_json::from_str(r#"{"token": "abc.def"}"#).unwrap();
        assert_eq!(tok.token, "abc.def");
    }
}
