//! Rolegate - role-based access control service
//!
//! Usage:
//!   rolegate                                          - Start the HTTP server
//!   rolegate serve [--bind addr]                      - Start the HTTP server
//!   rolegate policy check --user <id> --permission <name>
//!   rolegate policy grants --user <id>

use clap::{Parser, Subcommand};
use rolegate_app::commands::{PolicyCommand, ServeCommand};

#[derive(Parser)]
#[command(name = "rolegate")]
#[command(about = "Rolegate - users, roles and permissions over HTTP")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeCommand),
    /// Offline permission checks against a data file
    Policy(PolicyCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve(cmd)) => cmd.run().await,
        Some(Commands::Policy(cmd)) => cmd.run(),
        None => ServeCommand::default().run().await,
    }
}
