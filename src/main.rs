mod api;
mod cli;
mod config;
mod error;
mod output;
mod poller;
mod presenter;
mod ranking;
mod report;
mod score;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting profilens - GitHub Profile Analysis Client");
    cli.execute().await?;

    Ok(())
}
