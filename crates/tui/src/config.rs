use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::i18n::Msg;

// Re-export shared config types from core
pub use promptshare_core::config::{CONFIG_FILE_NAME, ClientConfig, Lang, UiTheme};

// ── File I/O ────────────────────────────────────────────────────────────

pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("promptshare"))
}

/// Load client config from `~/.config/promptshare/client.toml`.
/// Any read or parse failure falls back to defaults.
pub fn load_client_config() -> ClientConfig {
    let dir = match config_dir() {
        Ok(d) => d,
        Err(_) => return ClientConfig::default(),
    };
    let path = dir.join(CONFIG_FILE_NAME);
    std::fs::read_to_string(&path)
        .ok()
        .and_then(|s| toml::from_str(&s).ok())
        .unwrap_or_default()
}

/// Save client config to `~/.config/promptshare/client.toml`.
pub fn save_client_config(config: &ClientConfig) -> Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

// ── Setting fields enum ─────────────────────────────────────────────────

/// Identifies a single editable setting in the settings view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    ServerUrl,
    Account,
    Language,
    Theme,
    PageSize,
    DebounceMs,
}

/// A display item in the settings list. Headers are not selectable.
#[derive(Debug, Clone)]
pub enum SettingItem {
    Header(Msg),
    Field {
        field: SettingField,
        label: Msg,
        description: Msg,
    },
}

impl SettingItem {
    pub fn field(&self) -> Option<SettingField> {
        match self {
            Self::Header(_) => None,
            Self::Field { field, .. } => Some(*field),
        }
    }
}

/// The ordered list of items shown in the settings view.
pub const SETTINGS_LAYOUT: &[SettingItem] = &[
    SettingItem::Header(Msg::SettingsServer),
    SettingItem::Field {
        field: SettingField::ServerUrl,
        label: Msg::SettingsServerUrl,
        description: Msg::SettingsServerUrlDesc,
    },
    SettingItem::Header(Msg::SettingsAccount),
    SettingItem::Field {
        field: SettingField::Account,
        label: Msg::SettingsAccountStatus,
        description: Msg::SettingsAccountStatusDesc,
    },
    SettingItem::Header(Msg::SettingsInterface),
    SettingItem::Field {
        field: SettingField::Language,
        label: Msg::SettingsLanguage,
        description: Msg::SettingsLanguageDesc,
    },
    SettingItem::Field {
        field: SettingField::Theme,
        label: Msg::SettingsTheme,
        description: Msg::SettingsThemeDesc,
    },
    SettingItem::Field {
        field: SettingField::PageSize,
        label: Msg::SettingsPageSize,
        description: Msg::SettingsPageSizeDesc,
    },
    SettingItem::Field {
        field: SettingField::DebounceMs,
        label: Msg::SettingsDebounce,
        description: Msg::SettingsDebounceDesc,
    },
];

impl SettingField {
    /// Whether this field cycles through enum options.
    pub fn is_enum(self) -> bool {
        matches!(self, Self::Language | Self::Theme)
    }

    /// Whether Enter triggers an action rather than editing a value.
    pub fn is_action(self) -> bool {
        matches!(self, Self::Account)
    }

    /// Get the current value as a display string from the config.
    pub fn display_value(self, config: &ClientConfig) -> String {
        match self {
            Self::ServerUrl => config.server.url.clone(),
            Self::Account => {
                if config.auth.is_logged_in() {
                    config.auth.username.clone()
                } else {
                    crate::i18n::text(config.ui.language, Msg::NotLoggedIn).to_string()
                }
            }
            Self::Language => config.ui.language.display().to_string(),
            Self::Theme => config.ui.theme.display().to_string(),
            Self::PageSize => config.ui.page_size.to_string(),
            Self::DebounceMs => config.ui.search_debounce_ms.to_string(),
        }
    }

    /// Get the raw (editable) value from the config.
    pub fn raw_value(self, config: &ClientConfig) -> String {
        match self {
            Self::ServerUrl => config.server.url.clone(),
            Self::PageSize => config.ui.page_size.to_string(),
            Self::DebounceMs => config.ui.search_debounce_ms.to_string(),
            _ => String::new(),
        }
    }

    /// Cycle an enum field.
    pub fn cycle_enum(self, config: &mut ClientConfig) {
        match self {
            Self::Language => config.ui.language = config.ui.language.cycle(),
            Self::Theme => config.ui.theme = config.ui.theme.cycle(),
            _ => {}
        }
    }

    /// Set a text/number value. Non-numeric input for numeric fields is
    /// ignored; a zero page size would make every page short, so it is too.
    pub fn set_value(self, config: &mut ClientConfig, value: &str) {
        match self {
            Self::ServerUrl => config.server.url = value.trim().to_string(),
            Self::PageSize => {
                if let Ok(v) = value.trim().parse::<u32>() {
                    if v > 0 {
                        config.ui.page_size = v;
                    }
                }
            }
            Self::DebounceMs => {
                if let Ok(v) = value.trim().parse::<u64>() {
                    config.ui.search_debounce_ms = v;
                }
            }
            _ => {}
        }
    }
}

/// Count of selectable (non-header) fields in SETTINGS_LAYOUT.
pub fn selectable_field_count() -> usize {
    SETTINGS_LAYOUT
        .iter()
        .filter(|item| item.field().is_some())
        .count()
}

/// Get the nth selectable field.
pub fn nth_selectable_field(n: usize) -> Option<SettingField> {
    SETTINGS_LAYOUT
        .iter()
        .filter_map(|item| item.field())
        .nth(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_exposes_all_fields_in_order() {
        let fields: Vec<_> = SETTINGS_LAYOUT.iter().filter_map(|i| i.field()).collect();
        assert_eq!(
            fields,
            vec![
                SettingField::ServerUrl,
                SettingField::Account,
                SettingField::Language,
                SettingField::Theme,
                SettingField::PageSize,
                SettingField::DebounceMs,
            ]
        );
        assert_eq!(selectable_field_count(), 6);
        assert_eq!(nth_selectable_field(2), Some(SettingField::Language));
        assert_eq!(nth_selectable_field(99), None);
    }

    #[test]
    fn cycle_language_flips_between_en_and_zh() {
        let mut config = ClientConfig::default();
        assert_eq!(config.ui.language, Lang::Zh);
        SettingField::Language.cycle_enum(&mut config);
        assert_eq!(config.ui.language, Lang::En);
        SettingField::Language.cycle_enum(&mut config);
        assert_eq!(config.ui.language, Lang::Zh);
    }

    #[test]
    fn set_value_ignores_invalid_numbers() {
        let mut config = ClientConfig::default();
        SettingField::PageSize.set_value(&mut config, "not-a-number");
        assert_eq!(config.ui.page_size, 9);
        SettingField::PageSize.set_value(&mut config, "0");
        assert_eq!(config.ui.page_size, 9);
        SettingField::PageSize.set_value(&mut config, "20");
        assert_eq!(config.ui.page_size, 20);
    }

    #[test]
    fn account_shows_username_when_logged_in() {
        let mut config = ClientConfig::default();
        config.auth.token = "tok".to_string();
        config.auth.username = "mira".to_string();
        assert_eq!(SettingField::Account.display_value(&config), "mira");
    }
}
