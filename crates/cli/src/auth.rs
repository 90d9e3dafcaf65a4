use anyhow::{bail, Context, Result};
use dialoguer::{Input, Password};
use std::time::Duration;

use promptshare_api_client::promptshare_api::{LoginRequest, RegisterRequest};
use promptshare_api_client::ApiClient;
use promptshare_tui::config::{load_client_config, save_client_config, ClientConfig};

/// Log in against the configured (or overridden) server and store the token.
pub async fn run_login(server: Option<String>, username: Option<String>) -> Result<()> {
    let mut config = load_client_config();
    if let Some(url) = server {
        config.server.url = url;
    }

    let username = resolve_username(username)?;
    let password: String = Password::new()
        .with_prompt("Password")
        .interact()
        .context("failed to read password")?;

    let client = make_client(&config)?;
    let resp = client
        .login(&LoginRequest {
            username: username.clone(),
            password,
        })
        .await?;

    config.auth.token = resp.token;
    config.auth.username = username;
    save_client_config(&config)?;

    println!(
        "Logged in as {} on {}",
        config.auth.username, config.server.url
    );
    Ok(())
}

/// Create an account, then store the returned token as a login.
pub async fn run_register(server: Option<String>, username: Option<String>) -> Result<()> {
    let mut config = load_client_config();
    if let Some(url) = server {
        config.server.url = url;
    }

    let username = resolve_username(username)?;
    let password: String = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .context("failed to read password")?;

    let client = make_client(&config)?;
    let resp = client
        .register(&RegisterRequest {
            username: username.clone(),
            password,
        })
        .await?;

    config.auth.token = resp.token;
    config.auth.username = username;
    save_client_config(&config)?;

    println!(
        "Account created. Logged in as {} on {}",
        config.auth.username, config.server.url
    );
    Ok(())
}

fn resolve_username(flag: Option<String>) -> Result<String> {
    let name = match flag {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("failed to read username")?,
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        bail!("Username must not be empty");
    }
    Ok(name)
}

fn make_client(config: &ClientConfig) -> Result<ApiClient> {
    let client = ApiClient::new(
        &config.server.url,
        Duration::from_secs(config.server.timeout_secs),
    )?;
    Ok(client)
}
