mod repl;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_app::console::LibraryConsole;
use shelf_kernel::settings::{FailurePolicy, Settings, ValidationPolicy};
use tokio::io::BufReader;

#[derive(Debug, Parser)]
#[command(name = "shelf", version, about = "Book library console and collection service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the book collection service
    Serve {
        /// Port to listen on, overriding configuration
        #[arg(long)]
        port: Option<u16>,
    },
    /// Open an interactive library console against a running service
    Console {
        /// Service root, overriding configuration
        #[arg(long)]
        base_url: Option<String>,
        /// Return request failures and keep drafts instead of ignoring them
        #[arg(long)]
        strict: bool,
        /// Refuse to submit drafts with a blank title or author
        #[arg(long)]
        require_fields: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            shelf_app::serve(&settings).await
        }
        Command::Console {
            base_url,
            strict,
            require_fields,
        } => {
            if let Some(base_url) = base_url {
                settings.console.base_url = base_url;
            }
            if strict {
                settings.console.failure_policy = FailurePolicy::Strict;
            }
            if require_fields {
                settings.console.validation = ValidationPolicy::Presence;
            }

            tracing::info!(
                base_url = %settings.console.base_url,
                policy = ?settings.console.failure_policy,
                "opening library console"
            );
            let console = LibraryConsole::connect(&settings.console)
                .with_context(|| "failed to build the console HTTP client")?;
            console.mount().await;

            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            repl::run(&console, stdin, &mut stdout).await
        }
    }
}
