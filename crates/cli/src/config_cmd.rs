use anyhow::{bail, Result};

use promptshare_tui::config::{
    config_dir, load_client_config, save_client_config, Lang, UiTheme, CONFIG_FILE_NAME,
};

/// Print current config.
pub fn show_config() -> Result<()> {
    let config = load_client_config();
    let path = config_dir()?.join(CONFIG_FILE_NAME);
    println!("Config file: {}", path.display());
    println!();
    println!("[server]");
    println!("  url     = {}", config.server.url);
    println!("  timeout = {}s", config.server.timeout_secs);
    println!();
    println!("[auth]");
    if config.auth.is_logged_in() {
        println!("  username = {}", config.auth.username);
        println!(
            "  token    = {}...",
            &config.auth.token[..8.min(config.auth.token.len())]
        );
    } else {
        println!("  username = (not logged in)");
    }
    println!();
    println!("[ui]");
    println!("  language           = {}", lang_value(config.ui.language));
    println!("  theme              = {}", theme_value(config.ui.theme));
    println!("  page_size          = {}", config.ui.page_size);
    println!("  search_debounce_ms = {}", config.ui.search_debounce_ms);
    Ok(())
}

/// Update config with provided values.
pub fn set_config(
    server: Option<String>,
    language: Option<String>,
    theme: Option<String>,
    page_size: Option<u32>,
) -> Result<()> {
    let mut config = load_client_config();

    if let Some(url) = server {
        config.server.url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(raw) = language {
        config.ui.language = parse_lang(&raw)?;
    }
    if let Some(raw) = theme {
        config.ui.theme = parse_theme(&raw)?;
    }
    if let Some(size) = page_size {
        if size == 0 {
            bail!("page size must be greater than 0");
        }
        config.ui.page_size = size;
    }

    save_client_config(&config)?;
    println!("Configuration updated.");
    println!();
    show_config()?;
    Ok(())
}

fn parse_lang(raw: &str) -> Result<Lang> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "en" => Ok(Lang::En),
        "zh" => Ok(Lang::Zh),
        _ => bail!("unsupported language '{}'; expected one of: en|zh", raw),
    }
}

fn parse_theme(raw: &str) -> Result<UiTheme> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "dark" => Ok(UiTheme::Dark),
        "light" => Ok(UiTheme::Light),
        _ => bail!("unsupported theme '{}'; expected one of: dark|light", raw),
    }
}

fn lang_value(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "en",
        Lang::Zh => "zh",
    }
}

fn theme_value(theme: UiTheme) -> &'static str {
    match theme {
        UiTheme::Dark => "dark",
        UiTheme::Light => "light",
    }
}
