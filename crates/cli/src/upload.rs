use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::Duration;

use promptshare_api_client::{upload_with_retry, ApiClient, RetryConfig};
use promptshare_core::file::{format_size, guess_mime};
use promptshare_tui::config::load_client_config;

/// Upload a file to the configured server, retrying transient failures.
pub async fn run_upload(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let config = load_client_config();
    if !config.auth.is_logged_in() {
        bail!("Not logged in. Run `promptshare login` first.");
    }

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.bin".to_string());
    let mime = guess_mime(&file_name);

    println!(
        "Uploading {} ({}) to {}...",
        file_name,
        format_size(bytes.len() as i64),
        config.server.url
    );

    let mut client = ApiClient::new(
        &config.server.url,
        Duration::from_secs(config.server.timeout_secs),
    )?;
    client.set_auth(config.auth.token.clone());

    let stored = upload_with_retry(&client, &file_name, &bytes, mime, &RetryConfig::default())
        .await
        .with_context(|| format!("Failed to upload {}", file_name))?;

    println!("Upload successful!");
    println!("File ID: {}", stored.id);
    Ok(())
}
