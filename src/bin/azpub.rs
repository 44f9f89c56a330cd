use azpub::cli::{commands, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    azpub::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Publish => commands::execute_publish().await?,
        Commands::Regions => commands::execute_regions().await?,
    }

    Ok(())
}
