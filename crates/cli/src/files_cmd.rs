use anyhow::{bail, Result};
use std::time::Duration;

use promptshare_api_client::promptshare_api::FileListQuery;
use promptshare_api_client::ApiClient;
use promptshare_core::file::format_size;
use promptshare_core::time::format_timestamp;
use promptshare_core::StoredFile;
use promptshare_tui::config::load_client_config;

/// List uploaded files, one line per file.
pub async fn run_list(page: Option<u32>, size: Option<u32>) -> Result<()> {
    let config = load_client_config();
    if !config.auth.is_logged_in() {
        bail!("Not logged in. Run `promptshare login` first.");
    }

    let mut client = ApiClient::new(
        &config.server.url,
        Duration::from_secs(config.server.timeout_secs),
    )?;
    client.set_auth(config.auth.token.clone());

    let query = FileListQuery {
        page: page.unwrap_or(1),
        size: size.unwrap_or(config.ui.page_size),
    };
    let result = client.list_files(&query).await?;

    if result.list.is_empty() {
        println!("No files found.");
        return Ok(());
    }

    for file in &result.list {
        println!("{}", file_line(file));
    }
    println!();
    println!(
        "Page {}: {} of {} files",
        result.page,
        result.list.len(),
        result.total
    );
    Ok(())
}

fn file_line(file: &StoredFile) -> String {
    format!(
        "#{:<6} {:<32} {:>10}  {:<12} {}",
        file.id,
        file.name,
        format_size(file.size),
        file.mime,
        format_timestamp(&file.created_at)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_line_aligns_columns() {
        let file = StoredFile {
            id: 7,
            name: "cover.png".to_string(),
            path: "/uploads/cover.png".to_string(),
            size: 2048,
            mime: "image/png".to_string(),
            created_at: "2025-06-01 12:30:00".to_string(),
        };
        let line = file_line(&file);
        assert!(line.starts_with("#7      cover.png"));
        assert!(line.contains("2 KB"));
        assert!(line.contains("image/png"));
    }
}
