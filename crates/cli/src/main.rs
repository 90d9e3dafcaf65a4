mod auth;
mod config_cmd;
mod files_cmd;
mod prompts_cmd;
mod upload;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "promptshare", about = "promptshare CLI - browse, create, and share prompts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the auth token in the config file
    Login {
        /// Server URL (overrides the configured one)
        #[arg(long)]
        server: Option<String>,

        /// Username (prompted for when omitted)
        #[arg(long)]
        username: Option<String>,
    },

    /// Create an account, then log in with it
    Register {
        /// Server URL (overrides the configured one)
        #[arg(long)]
        server: Option<String>,

        /// Username (prompted for when omitted)
        #[arg(long)]
        username: Option<String>,
    },

    /// Show or set configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        server: Option<String>,

        /// Set the UI language (en or zh)
        #[arg(long)]
        language: Option<String>,

        /// Set the UI theme (dark or light)
        #[arg(long)]
        theme: Option<String>,

        /// Set the list page size
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Upload a file to the server
    Upload {
        /// Path to the file
        path: PathBuf,
    },

    /// Browse and create prompts
    Prompts {
        #[command(subcommand)]
        action: PromptsAction,
    },

    /// List uploaded files
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },

    /// Launch the interactive terminal UI
    Tui,
}

#[derive(Subcommand)]
enum PromptsAction {
    /// List prompts, one line each
    List {
        /// Filter by search text
        #[arg(long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        size: Option<u32>,
    },

    /// Create a new prompt
    Create {
        /// Prompt title
        #[arg(long)]
        title: String,

        /// Prompt content
        #[arg(long)]
        content: Option<String>,

        /// Tags, comma separated or repeated
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Where the prompt was found
        #[arg(long)]
        source_url: Option<String>,

        /// Original author
        #[arg(long)]
        source_by: Option<String>,

        /// Tags from the source site, comma separated or repeated
        #[arg(long, value_delimiter = ',')]
        source_tags: Vec<String>,
    },
}

#[derive(Subcommand)]
enum FilesAction {
    /// List uploaded files, one line each
    List {
        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        size: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login { server, username } => auth::run_login(server, username).await,
        Commands::Register { server, username } => auth::run_register(server, username).await,
        Commands::Config { server, language, theme, page_size } => {
            if server.is_none() && language.is_none() && theme.is_none() && page_size.is_none() {
                config_cmd::show_config()
            } else {
                config_cmd::set_config(server, language, theme, page_size)
            }
        }
        Commands::Upload { path } => upload::run_upload(&path).await,
        Commands::Prompts { action } => match action {
            PromptsAction::List { search, page, size } => {
                prompts_cmd::run_list(search, page, size).await
            }
            PromptsAction::Create {
                title,
                content,
                tags,
                source_url,
                source_by,
                source_tags,
            } => {
                prompts_cmd::run_create(title, content, tags, source_url, source_by, source_tags)
                    .await
            }
        },
        Commands::Files { action } => match action {
            FilesAction::List { page, size } => files_cmd::run_list(page, size).await,
        },
        Commands::Tui => promptshare_tui::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
