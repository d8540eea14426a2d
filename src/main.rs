use capture_tool::{exit_code, load_config, setup_logging, CaptureClient, Cli, CliRunner, Credentials};
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    if let Err(e) = setup_logging(args.verbose) {
        eprintln!("{e:#}");
    }

    debug!("Starting capture v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code(&e));
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    // Read once; a missing key or secret is fatal.
    let credentials = Credentials::from_env()?;
    let config = load_config(&args).await?;

    let client = CaptureClient::with_config(credentials, config)?;
    let runner = CliRunner::new(client, args.dry_run);

    runner.run(args.command).await
}
