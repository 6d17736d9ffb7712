//! # fundaview CLI

use clap::Parser;

use crate::cli::Commands;

mod cli;

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    fundaview::init().await;

    match &cli.command {
        Commands::Bookmark(cmd) => {
            cmd.exec().await;
        }
        Commands::Browse(cmd) => {
            cmd.exec().await;
        }
        Commands::Config(cmd) => {
            cmd.exec().await;
        }
        Commands::Search(cmd) => {
            cmd.exec().await;
        }
        Commands::Show(cmd) => {
            cmd.exec().await;
        }
    }
}
