use std::path::PathBuf;
use std::time::Duration;

use promptshare_api::{FileListQuery, LoginRequest, PromptDraft, PromptListQuery, RegisterRequest};
use promptshare_api_client::ApiClient;
use promptshare_core::config::ClientConfig;
use promptshare_core::file::guess_mime;
use promptshare_core::{PageRequest, Prompt, PromptImage, StoredFile};

use crate::app::FeedKind;

/// Commands that require async I/O (network calls).
pub enum AsyncCommand {
    // ── Feed pages ────────────────────────────────────────────────────
    FetchPrompts {
        feed: FeedKind,
        request: PageRequest,
    },
    FetchFiles {
        request: PageRequest,
    },

    // ── Auth ──────────────────────────────────────────────────────────
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        password: String,
    },

    // ── Prompt mutations ──────────────────────────────────────────────
    CreatePrompt {
        draft: PromptDraft,
        images: Vec<PromptImage>,
    },
    UpdatePrompt {
        id: i64,
        draft: PromptDraft,
        images: Vec<PromptImage>,
    },

    // ── Files ─────────────────────────────────────────────────────────
    UploadFile {
        path: PathBuf,
    },
    DownloadFile {
        id: i64,
        name: String,
    },
}

/// Results returned by async commands. Page results carry their originating
/// request so the feed can discard responses for a superseded filter.
pub enum CommandResult {
    Prompts {
        feed: FeedKind,
        request: PageRequest,
        result: Result<Vec<Prompt>, String>,
    },
    Files {
        request: PageRequest,
        result: Result<Vec<StoredFile>, String>,
    },

    // Ok((username, token))
    Auth {
        register: bool,
        result: Result<(String, String), String>,
    },

    PromptSaved {
        created: bool,
        result: Result<Prompt, String>,
    },

    FileUploaded(Result<StoredFile, String>),
    // Ok(written file name)
    FileDownloaded(Result<String, String>),
}

fn make_client(config: &ClientConfig) -> Result<ApiClient, String> {
    let mut client = ApiClient::new(
        &config.server.url,
        Duration::from_secs(config.server.timeout_secs),
    )
    .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
    if config.auth.is_logged_in() {
        client.set_auth(config.auth.token.clone());
    }
    Ok(client)
}

fn prompt_query(request: &PageRequest) -> PromptListQuery {
    PromptListQuery {
        page: request.page,
        size: request.page_size,
        q: if request.filter.is_empty() {
            None
        } else {
            Some(request.filter.clone())
        },
    }
}

pub async fn execute(cmd: AsyncCommand, config: ClientConfig) -> CommandResult {
    match cmd {
        // ── Feed pages ────────────────────────────────────────────────
        AsyncCommand::FetchPrompts { feed, request } => {
            let result = async {
                let client = make_client(&config)?;
                let page = client
                    .list_prompts(&prompt_query(&request))
                    .await
                    .map_err(|e| format!("{e}"))?;
                Ok(page.list)
            }
            .await;
            CommandResult::Prompts {
                feed,
                request,
                result,
            }
        }

        AsyncCommand::FetchFiles { request } => {
            let result = async {
                let client = make_client(&config)?;
                let page = client
                    .list_files(&FileListQuery {
                        page: request.page,
                        size: request.page_size,
                    })
                    .await
                    .map_err(|e| format!("{e}"))?;
                Ok(page.list)
            }
            .await;
            CommandResult::Files { request, result }
        }

        // ── Auth ──────────────────────────────────────────────────────
        AsyncCommand::Login { username, password } => {
            let result = async {
                let client = make_client(&config)?;
                let resp = client
                    .login(&LoginRequest {
                        username: username.clone(),
                        password,
                    })
                    .await
                    .map_err(|e| format!("{e}"))?;
                Ok((username, resp.token))
            }
            .await;
            CommandResult::Auth {
                register: false,
                result,
            }
        }

        AsyncCommand::Register { username, password } => {
            let result = async {
                let client = make_client(&config)?;
                let resp = client
                    .register(&RegisterRequest {
                        username: username.clone(),
                        password,
                    })
                    .await
                    .map_err(|e| format!("{e}"))?;
                Ok((username, resp.token))
            }
            .await;
            CommandResult::Auth {
                register: true,
                result,
            }
        }

        // ── Prompt mutations ──────────────────────────────────────────
        AsyncCommand::CreatePrompt { draft, images } => {
            let result = async {
                let client = make_client(&config)?;
                let mut created = client
                    .create_prompt(&draft)
                    .await
                    .map_err(|e| format!("{e}"))?;
                if !images.is_empty() {
                    let attached: Vec<PromptImage> = images
                        .into_iter()
                        .map(|mut img| {
                            img.prompt_id = Some(created.id);
                            img
                        })
                        .collect();
                    client
                        .set_prompt_images(created.id, &attached)
                        .await
                        .map_err(|e| format!("{e}"))?;
                    created.images = attached;
                }
                Ok(created)
            }
            .await;
            CommandResult::PromptSaved {
                created: true,
                result,
            }
        }

        AsyncCommand::UpdatePrompt { id, draft, images } => {
            let result = async {
                let client = make_client(&config)?;
                let mut updated = client
                    .update_prompt(id, &draft)
                    .await
                    .map_err(|e| format!("{e}"))?;
                // The images endpoint replaces the whole set, so an empty
                // list must still be posted to clear removed images.
                let attached: Vec<PromptImage> = images
                    .into_iter()
                    .map(|mut img| {
                        img.prompt_id = Some(id);
                        img
                    })
                    .collect();
                client
                    .set_prompt_images(id, &attached)
                    .await
                    .map_err(|e| format!("{e}"))?;
                updated.images = attached;
                Ok(updated)
            }
            .await;
            CommandResult::PromptSaved {
                created: false,
                result,
            }
        }

        // ── Files ─────────────────────────────────────────────────────
        AsyncCommand::UploadFile { path } => {
            let result = async {
                let bytes =
                    std::fs::read(&path).map_err(|e| format!("read {}: {e}", path.display()))?;
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("upload.bin")
                    .to_string();
                let client = make_client(&config)?;
                client
                    .upload_file(&name, bytes, guess_mime(&name))
                    .await
                    .map_err(|e| format!("{e}"))
            }
            .await;
            CommandResult::FileUploaded(result)
        }

        AsyncCommand::DownloadFile { id, name } => {
            let result = async {
                let client = make_client(&config)?;
                let bytes = client.download_file(id).await.map_err(|e| format!("{e}"))?;
                let target = if name.is_empty() {
                    format!("file-{id}")
                } else {
                    name
                };
                std::fs::write(&target, bytes).map_err(|e| format!("write {target}: {e}"))?;
                Ok(target)
            }
            .await;
            CommandResult::FileDownloaded(result)
        }
    }
}
