use anyhow::{bail, Result};
use std::time::Duration;

use promptshare_api_client::promptshare_api::{PromptDraft, PromptListQuery};
use promptshare_api_client::ApiClient;
use promptshare_core::Prompt;
use promptshare_tui::config::load_client_config;

/// List prompts matching the query, one line per prompt.
pub async fn run_list(search: Option<String>, page: Option<u32>, size: Option<u32>) -> Result<()> {
    let config = load_client_config();
    let mut client = ApiClient::new(
        &config.server.url,
        Duration::from_secs(config.server.timeout_secs),
    )?;
    if config.auth.is_logged_in() {
        client.set_auth(config.auth.token.clone());
    }

    let query = PromptListQuery {
        page: page.unwrap_or(1),
        size: size.unwrap_or(config.ui.page_size),
        q: normalize_opt(search),
    };
    let result = client.list_prompts(&query).await?;

    if result.list.is_empty() {
        println!("No prompts found.");
        return Ok(());
    }

    for prompt in &result.list {
        println!("{}", prompt_line(prompt));
    }
    println!();
    println!(
        "Page {}: {} of {} prompts",
        result.page,
        result.list.len(),
        result.total
    );
    Ok(())
}

/// Create a prompt from command-line fields.
pub async fn run_create(
    title: String,
    content: Option<String>,
    tags: Vec<String>,
    source_url: Option<String>,
    source_by: Option<String>,
    source_tags: Vec<String>,
) -> Result<()> {
    let title = title.trim().to_string();
    if title.is_empty() {
        bail!("Title must not be empty");
    }

    let config = load_client_config();
    if !config.auth.is_logged_in() {
        bail!("Not logged in. Run `promptshare login` first.");
    }

    let mut client = ApiClient::new(
        &config.server.url,
        Duration::from_secs(config.server.timeout_secs),
    )?;
    client.set_auth(config.auth.token.clone());

    let draft = PromptDraft {
        title,
        content: content.unwrap_or_default(),
        tags: join_tags(tags),
        source_url: normalize_opt(source_url),
        source_by: normalize_opt(source_by),
        source_tags: join_tags(source_tags),
    };
    let created = client.create_prompt(&draft).await?;

    println!("Created prompt #{}: {}", created.id, created.title);
    Ok(())
}

fn prompt_line(prompt: &Prompt) -> String {
    let mut line = format!("#{:<6} {}", prompt.id, prompt.title);
    let tags = prompt.tag_list();
    if !tags.is_empty() {
        line.push_str(&format!("  [{}]", tags.join(", ")));
    }
    if let Some(author) = prompt.author_name.as_deref().filter(|a| !a.is_empty()) {
        line.push_str(&format!("  by {author}"));
    }
    line
}

fn join_tags(tags: Vec<String>) -> Option<String> {
    let cleaned: Vec<String> = tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(", "))
    }
}

fn normalize_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
