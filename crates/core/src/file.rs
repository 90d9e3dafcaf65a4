use serde::{Deserialize, Serialize};

/// A file stored on the server, as listed by the files endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: i64,
    pub name: String,
    pub path: String,
    /// Size in bytes.
    pub size: i64,
    /// MIME type reported at upload time.
    #[serde(rename = "type")]
    pub mime: String,
    pub created_at: String,
}

/// Broad category derived from the MIME type, for icons and preview gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Audio,
    Video,
    Text,
    Other,
}

impl StoredFile {
    pub fn kind(&self) -> FileKind {
        if self.mime.starts_with("image/") {
            FileKind::Image
        } else if self.mime.starts_with("audio/") {
            FileKind::Audio
        } else if self.mime.starts_with("video/") {
            FileKind::Video
        } else if self.mime.starts_with("text/") || self.mime == "application/json" {
            FileKind::Text
        } else {
            FileKind::Other
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind() == FileKind::Image
    }
}

/// Guess a MIME type from a file name's extension, for upload requests.
pub fn guess_mime(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "txt" | "md" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Human-readable size: "0 Bytes", "812 Bytes", "1.5 KB", "2.37 MB".
/// Two decimals maximum, trailing zeros dropped.
pub fn format_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes <= 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let mut text = format!("{value:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{text} {}", UNITS[unit])
}
