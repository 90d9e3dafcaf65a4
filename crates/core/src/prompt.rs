use serde::{Deserialize, Serialize};

/// A shared prompt as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Prompt {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Comma-separated tag string, e.g. "writing, sci-fi".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<PromptImage>,
}

impl Prompt {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags.as_deref().map(parse_tags).unwrap_or_default()
    }

    pub fn source_tag_list(&self) -> Vec<String> {
        self.source_tags
            .as_deref()
            .map(parse_tags)
            .unwrap_or_default()
    }
}

/// An image attached to a prompt, referencing an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_id: Option<i64>,
    pub file_id: i64,
    /// Comma-separated tag string for this image.
    #[serde(default)]
    pub tags: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Split a comma-separated tag string into trimmed, non-empty tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
