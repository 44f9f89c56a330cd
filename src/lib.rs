//! azpub - publish a local git repository to Azure App Service.
//!
//! Provisions a resource group and a web app, enables local-git
//! deployment on it, and rewires the repository's remotes to point at
//! the new deployment endpoint.

pub mod azure;
pub mod cli;
pub mod git;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber.
/// Uses RUST_LOG env var for filtering (defaults to info). Diagnostics go
/// to stderr so they never interleave with prompts on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
