use crate::{
    options::parse_options, render_content, render_metadata, write_output, CaptureClient,
    CaptureError, ClientConfig, RequestKind,
};
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "capture")]
#[command(about = "Capture CLI - screenshots, PDFs, and content extraction")]
#[command(
    long_about = "Capture CLI takes screenshots, generates PDFs, and extracts content from web \
pages using the Capture API.\n\nAuthentication is done via environment variables:\n  \
CAPTURE_KEY    - Your Capture API key\n  CAPTURE_SECRET - Your Capture API secret"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Use edge server for faster response")]
    pub edge: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "DURATION",
        value_parser = humantime::parse_duration,
        help = "Request timeout, e.g. 30s, 500ms, 1m (default: 30s)"
    )]
    pub timeout: Option<Duration>,

    #[arg(long, global = true, help = "Print the request URL without executing")]
    pub dry_run: bool,

    #[arg(long, global = true, help = "Configuration file path (JSON)")]
    pub config: Option<PathBuf>,
}

/// Arguments shared by every capture subcommand
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    #[arg(help = "URL of the page to capture")]
    pub url: String,

    #[arg(
        short = 'X',
        long = "option",
        value_name = "KEY=VALUE",
        help = "API option as key=value (can be repeated)"
    )]
    pub options: Vec<String>,

    // Kept as a string: `-o ""` is a valid way to ask for stdout.
    #[arg(short, long, help = "Output file, `-` or empty for stdout (default: stdout)")]
    pub output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take a screenshot of a web page
    Screenshot {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Generate a PDF from a web page
    Pdf {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Extract content (HTML, text, or markdown) from a web page
    Content {
        #[command(flatten)]
        request: RequestArgs,

        #[arg(long, value_enum, default_value_t = ContentFormat::Markdown, help = "Output format")]
        format: ContentFormat,

        #[arg(long, help = "Output raw JSON response")]
        json: bool,
    },

    /// Extract metadata (title, description, Open Graph, etc.) from a web page
    Metadata {
        #[command(flatten)]
        request: RequestArgs,

        #[arg(long, help = "Pretty print JSON output")]
        pretty: bool,
    },

    /// Create an animated recording of a web page
    Animated {
        #[command(flatten)]
        request: RequestArgs,
    },
}

impl Commands {
    pub fn kind(&self) -> RequestKind {
        match self {
            Commands::Screenshot { .. } => RequestKind::Image,
            Commands::Pdf { .. } => RequestKind::Pdf,
            Commands::Content { .. } => RequestKind::Content,
            Commands::Metadata { .. } => RequestKind::Metadata,
            Commands::Animated { .. } => RequestKind::Animated,
        }
    }

    pub fn request(&self) -> &RequestArgs {
        match self {
            Commands::Screenshot { request }
            | Commands::Pdf { request }
            | Commands::Content { request, .. }
            | Commands::Metadata { request, .. }
            | Commands::Animated { request } => request,
        }
    }

    /// Wording used in progress logs and error context.
    fn action(&self) -> &'static str {
        match self {
            Commands::Screenshot { .. } => "capture screenshot",
            Commands::Pdf { .. } => "generate PDF",
            Commands::Content { .. } => "extract content",
            Commands::Metadata { .. } => "extract metadata",
            Commands::Animated { .. } => "create animated capture",
        }
    }
}

/// Which part of a content response to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentFormat {
    /// Raw HTML content
    Html,
    /// Plain text content
    Text,
    /// Markdown formatted content
    Markdown,
}

pub struct CliRunner {
    pub client: CaptureClient,
    pub dry_run: bool,
}

impl CliRunner {
    pub fn new(client: CaptureClient, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    pub async fn run(&self, command: Commands) -> anyhow::Result<()> {
        let kind = command.kind();
        let action = command.action();
        let request = command.request();
        let options = parse_options(&request.options)?;

        if self.dry_run {
            let url = self.client.build_url(kind, &request.url, &options)?;
            println!("{url}");
            return Ok(());
        }

        info!("Requesting service to {} for {}", action, request.url);

        let data = match &command {
            Commands::Content { format, json, .. } => {
                let content = self
                    .client
                    .fetch_content(&request.url, &options)
                    .await
                    .with_context(|| format!("failed to {action}"))?;
                render_content(&content, *format, *json)?
            }
            Commands::Metadata { pretty, .. } => {
                let metadata = self
                    .client
                    .fetch_metadata(&request.url, &options)
                    .await
                    .with_context(|| format!("failed to {action}"))?;
                render_metadata(&metadata, *pretty)?
            }
            Commands::Screenshot { .. } | Commands::Pdf { .. } | Commands::Animated { .. } => self
                .client
                .fetch_bytes(kind, &request.url, &options)
                .await
                .with_context(|| format!("failed to {action}"))?,
        };

        write_output(&data, request.output.as_deref()).await?;
        Ok(())
    }
}

/// Resolve client configuration: defaults, then the optional config file,
/// then command-line overrides.
pub async fn load_config(args: &Cli) -> Result<ClientConfig, CaptureError> {
    let mut config = if let Some(config_path) = &args.config {
        let content = fs::read_to_string(config_path).await.map_err(|e| {
            CaptureError::Configuration(format!(
                "failed to read config file {}: {e}",
                config_path.display()
            ))
        })?;
        ClientConfig::from_json(&content)?
    } else {
        ClientConfig::default()
    };

    if args.edge {
        config.use_edge = true;
    }

    if let Some(timeout) = args.timeout {
        config.timeout = timeout;
    }

    config.validate()?;

    debug!("Base URL: {}", config.base_url());
    debug!("Request timeout: {:?}", config.timeout);

    Ok(config)
}

pub fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // stdout carries captured bytes, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

/// Exit status for a failed run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CaptureError>()
        .map_or(1, CaptureError::exit_code)
}
