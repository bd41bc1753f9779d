pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "shopmate",
    about = "Shopmate storefront agent CLI",
    long_about = "Run the interactive storefront agent and inspect its catalog and configuration.",
    after_help = "Examples:\n  shopmate chat\n  shopmate catalog\n  shopmate config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start the interactive storefront session (type 'quit' to leave)")]
    Chat,
    #[command(about = "List the products in the demo catalog")]
    Catalog {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Chat => commands::chat::run(),
        Command::Catalog { json } => {
            let result = commands::catalog::run(json);
            println!("{}", result.output);
            ExitCode::from(result.exit_code)
        }
        Command::Config => {
            let result = commands::config::run();
            println!("{}", result.output);
            ExitCode::from(result.exit_code)
        }
    }
}
