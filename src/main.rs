//! CLI entry point for quill-cms

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_cms::api::ApiClient;
use quill_cms::auth::FileTokenStore;
use quill_cms::config::Settings;

#[derive(Parser)]
#[command(name = "quill-cms")]
#[command(version = "0.1.0")]
#[command(about = "A terminal client for Markdown CMS backends", long_about = None)]
struct Cli {
    /// Override the API base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive UI (the default)
    Ui,

    /// Log in and store the session token
    Login,

    /// Log out and discard the session token
    Logout,

    /// List content
    List {
        /// Type of content to list (note, post)
        #[arg(short = 't', long = "type", default_value = "note")]
        kind: String,

        /// Filter by title
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Show pending changes in the content store
    Status,

    /// Commit and push pending content changes
    Publish {
        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ui);

    // The interactive UI owns the terminal; writing log lines over the
    // alternate screen would corrupt it, so logging stays off there.
    if !matches!(command, Commands::Ui) {
        let filter = if cli.debug {
            "quill_cms=debug,info"
        } else {
            "quill_cms=info"
        };
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let mut settings = Settings::load()?;
    if let Some(base) = cli.api_base {
        settings.api_base = base;
    }
    tracing::debug!("using API base {}", settings.api_base);

    let tokens = Arc::new(FileTokenStore::new(FileTokenStore::default_path()?));
    let client = ApiClient::new(settings.api_base.as_str(), tokens, settings.page_size);
    let rt = tokio::runtime::Runtime::new()?;

    match command {
        Commands::Ui => quill_cms::tui::run(&client, &rt)?,
        Commands::Login => rt.block_on(quill_cms::commands::login::run(&client))?,
        Commands::Logout => rt.block_on(quill_cms::commands::logout::run(&client))?,
        Commands::List { kind, query } => {
            rt.block_on(quill_cms::commands::list::run(&client, &kind, &query))?
        }
        Commands::Status => rt.block_on(quill_cms::commands::status::run(&client))?,
        Commands::Publish { message } => rt.block_on(quill_cms::commands::publish::run(
            &client,
            message.as_deref(),
        ))?,
        Commands::Version => {
            println!("quill-cms version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
