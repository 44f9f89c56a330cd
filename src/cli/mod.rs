pub mod commands;
pub mod config;
pub mod prompt;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "azpub")]
#[command(about = "Publish a local git repository to Azure App Service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Provision a resource group and web app, then wire up git deployment
    Publish,
    /// List the regions available to your subscription
    Regions,
}
