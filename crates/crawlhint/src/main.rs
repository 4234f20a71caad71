//! crawlhint CLI - search-engine notification after a deployment.
//!
//! Finds content files changed by the latest commit, maps them to public
//! URLs and notifies:
//! - Google Indexing API (when `GOOGLE_SERVICE_ACCOUNT_KEY` is set)
//! - `IndexNow` (when `INDEXNOW_KEY` is set)
//! - the `WebSub` hub for the site feed (always)

mod commands;
mod error;
mod output;
mod pipeline;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::NotifyArgs;
use output::Output;

/// Notify search engines about pages changed in the latest revision.
#[derive(Parser)]
#[command(name = "crawlhint", version, about)]
struct Cli {
    #[command(flatten)]
    notify: NotifyArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise RUST_LOG applies
    let filter = if cli.notify.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.notify.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
