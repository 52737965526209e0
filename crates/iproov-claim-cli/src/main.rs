//! A command-line host for the iProov claim API client.

#![warn(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::clone_on_ref_ptr
)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod logging_inspector;

#[tokio::main]
async fn main() -> Result<(), cli::Error> {
    init_logging();

    let cli::Root {
        credentials,
        command,
    } = cli::Root::parse();
    let client = credentials.client();

    let output = command.run(&client).await?;
    println!("{}", output);
    Ok(())
}

/// Install the log subscriber, writing to stderr so that stdout only carries the output.
///
/// The filter is taken from `RUST_LOG` and defaults to `info`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
