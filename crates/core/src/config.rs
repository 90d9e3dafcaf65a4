//! Shared client configuration types.
//!
//! The CLI and the TUI both read/write `client.toml` using these types.
//! File I/O lives in each binary crate; this module only defines the shape,
//! the defaults, and the enum preferences the settings screen cycles
//! through. The loaded config is passed explicitly wherever it is needed,
//! never read from ambient global state.

use serde::{Deserialize, Serialize};

/// Canonical config file name used by cli/tui.
pub const CONFIG_FILE_NAME: &str = "client.toml";

/// Top-level client configuration (persisted as `client.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_url")]
    pub url: String,
    /// Request timeout for every API call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthSettings {
    /// Bearer token issued at login; empty when logged out.
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub username: String,
}

impl AuthSettings {
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn clear(&mut self) {
        self.token.clear();
        self.username.clear();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_language")]
    pub language: Lang,
    #[serde(default)]
    pub theme: UiTheme,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            theme: UiTheme::default(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    En,
    Zh,
}

impl Lang {
    pub fn cycle(&self) -> Self {
        match self {
            Self::En => Self::Zh,
            Self::Zh => Self::En,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "中文",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

impl UiTheme {
    pub fn cycle(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ── Serde default functions ─────────────────────────────────────────────

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_timeout_secs() -> u64 {
    5
}
fn default_language() -> Lang {
    Lang::Zh
}
fn default_page_size() -> u32 {
    9
}
fn default_search_debounce_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_from_empty_toml() {
        let cfg: ClientConfig = toml::from_str("").expect("parse empty config");
        assert_eq!(cfg.server.url, "http://localhost:8080");
        assert_eq!(cfg.server.timeout_secs, 5);
        assert!(!cfg.auth.is_logged_in());
        assert_eq!(cfg.ui.language, Lang::Zh);
        assert_eq!(cfg.ui.theme, UiTheme::Dark);
        assert_eq!(cfg.ui.page_size, 9);
        assert_eq!(cfg.ui.search_debounce_ms, 500);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let cfg: ClientConfig = toml::from_str(
            r#"
[server]
url = "https://prompts.example.net"

[ui]
language = "en"
"#,
        )
        .expect("parse partial config");
        assert_eq!(cfg.server.url, "https://prompts.example.net");
        assert_eq!(cfg.server.timeout_secs, 5);
        assert_eq!(cfg.ui.language, Lang::En);
        assert_eq!(cfg.ui.page_size, 9);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut cfg = ClientConfig::default();
        cfg.auth.token = "tok-123".to_string();
        cfg.auth.username = "mira".to_string();
        cfg.ui.theme = UiTheme::Light;
        cfg.ui.page_size = 20;

        let encoded = toml::to_string_pretty(&cfg).expect("serialize config");
        let back: ClientConfig = toml::from_str(&encoded).expect("parse config");
        assert_eq!(back.auth.token, "tok-123");
        assert_eq!(back.auth.username, "mira");
        assert_eq!(back.ui.theme, UiTheme::Light);
        assert_eq!(back.ui.page_size, 20);
    }

    #[test]
    fn logout_clears_token_and_username() {
        let mut auth = AuthSettings {
            token: "tok".to_string(),
            username: "mira".to_string(),
        };
        assert!(auth.is_logged_in());
        auth.clear();
        assert!(!auth.is_logged_in());
        assert!(auth.username.is_empty());
    }

    #[test]
    fn preference_enums_cycle_through_all_values() {
        assert_eq!(Lang::En.cycle(), Lang::Zh);
        assert_eq!(Lang::Zh.cycle(), Lang::En);
        assert_eq!(UiTheme::Dark.cycle(), UiTheme::Light);
        assert_eq!(UiTheme::Light.cycle(), UiTheme::Dark);
    }
}
