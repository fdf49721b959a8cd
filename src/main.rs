use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use linkbio::config::{self as cfg, PageConfig};
use linkbio::sources::{self, FileSource, PageSource};
use linkbio::view::View;
use linkbio::{codec, editor, share};

/// linkbio CLI
#[derive(Debug, Parser)]
#[command(
    name = linkbio::PKG_NAME,
    version = linkbio::PKG_VERSION,
    about = "Pack a link-in-bio page into a share URL and read it back"
)]
struct Args {
    /// Set log level (e.g., trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(long = "log-level", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the share token for a page file
    Encode {
        /// Path to the page JSON file
        #[arg(short = 'c', long = "config", default_value = "page.json")]
        config: PathBuf,
    },

    /// Print the full share URL for a page file
    Share {
        #[arg(short = 'c', long = "config", default_value = "page.json")]
        config: PathBuf,

        /// Origin the viewer is served from
        #[arg(long, env = "LINKBIO_ORIGIN", default_value = "http://localhost:3000")]
        origin: String,
    },

    /// Decode a token (or a URL carrying `?d=`) and print the page as JSON
    Decode { input: String },

    /// Print what the public viewer would render for a URL
    View { url: String },

    /// Resolve the legacy `/v/<data>` path into its `/v?d=<data>` form
    Alias { path: String },

    /// Print the theme of a page file as CSS variables
    CssVars {
        #[arg(short = 'c', long = "config", default_value = "page.json")]
        config: PathBuf,
    },

    /// Print the theme of a page file as JSON
    ThemeJson {
        #[arg(short = 'c', long = "config", default_value = "page.json")]
        config: PathBuf,
    },

    /// Print a starter page to begin editing from
    Starter,

    /// Print the JSON Schema for page files
    Schema,

    /// Re-print the share URL every time the page file changes
    Watch {
        #[arg(short = 'c', long = "config", default_value = "page.json")]
        config: PathBuf,

        #[arg(long, env = "LINKBIO_ORIGIN", default_value = "http://localhost:3000")]
        origin: String,

        /// Poll interval in milliseconds
        #[arg(long = "poll-ms")]
        poll_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.log_level.as_deref() {
        Some(level) => linkbio::init_tracing_with_level(
            linkbio::parse_level(level).unwrap_or(tracing::Level::INFO),
        ),
        None => linkbio::init_tracing(),
    }
    debug!(version = linkbio::PKG_VERSION, command = ?args.command, "Starting linkbio");

    match args.command {
        Command::Encode { config } => {
            let page = cfg::load_from_path_async(&config).await?;
            println!("{}", codec::try_encode(&page)?);
        }

        Command::Share { config, origin } => {
            let page = cfg::load_from_path_async(&config).await?;
            println!("{}", share::share_url(&origin, &page));
        }

        Command::Decode { input } => {
            let page = decode_input(&input)?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }

        Command::View { url } => {
            let view = View::from_url(&url);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }

        Command::Alias { path } => match share::alias_redirect(&path) {
            Some(target) => println!("{target}"),
            None => bail!("'{}' is not a {}/<data> path", path, share::VIEWER_PATH),
        },

        Command::CssVars { config } => {
            let page = cfg::load_from_path_async(&config).await?;
            println!("{}", editor::css_variables(&page.theme));
        }

        Command::ThemeJson { config } => {
            let page = cfg::load_from_path_async(&config).await?;
            println!("{}", editor::theme_json(&page.theme)?);
        }

        Command::Starter => {
            println!("{}", serde_json::to_string_pretty(&editor::starter())?);
        }

        Command::Schema => {
            cfg::write_schema_to_writer(std::io::stdout().lock())?;
            println!();
        }

        Command::Watch {
            config,
            origin,
            poll_ms,
        } => watch(config, origin, poll_ms).await?,
    }

    Ok(())
}

/// Accept either a bare token or any URL form that carries `?d=`.
fn decode_input(input: &str) -> anyhow::Result<PageConfig> {
    let token = if input.contains('?') || input.contains("://") {
        share::extract_token(input)
            .with_context(|| format!("No `{}` parameter in '{}'", share::QUERY_PARAM, input))?
    } else {
        input.to_string()
    };

    match codec::decode(&token) {
        Ok(page) => Ok(page),
        Err(err) => bail!("Invalid link: {err}"),
    }
}

async fn watch(config: PathBuf, origin: String, poll_ms: Option<u64>) -> anyhow::Result<()> {
    let sources: Vec<Box<dyn PageSource>> = vec![Box::new(FileSource::new(
        config.to_string_lossy().into_owned(),
        poll_ms,
    ))];

    let (tx, mut rx) = mpsc::channel::<PageConfig>(16);
    let _handles = sources::spawn_all_sources(&sources, tx);
    info!(config = %config.display(), %origin, "Watching page file");

    tokio::select! {
        _ = async {
            while let Some(page) = rx.recv().await {
                let url = share::share_url(&origin, &page);
                if url.len() > 8 * 1024 {
                    warn!(len = url.len(), "Share URL is long; some apps may truncate it");
                }
                println!("{url}");
            }
        } => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
