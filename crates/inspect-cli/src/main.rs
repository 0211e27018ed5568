//! Inspect CLI - classify domains and check API access tokens.

use clap::Parser;
use inspect_cli::commands;
use inspect_cli::{telemetry, App, Cli, Command, Formatter, InspectConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let formatter = Formatter::new(cli.json);

    if let Err(e) = run(cli, &formatter).await {
        eprintln!("{}", formatter.error(&e));
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, formatter: &Formatter) -> inspect_cli::Result<()> {
    let config = InspectConfig::load(cli.config.as_deref())?;
    telemetry::init(config.log_format, cli.verbose)?;

    let app = App::build(&config)?;

    let result = match cli.command {
        Command::Classify(args) => commands::execute_classify(args, &app, formatter).await,
        Command::Authorize(args) => commands::execute_authorize(args, &app, formatter).await,
        Command::Grant(args) => commands::execute_grant(args, &app, formatter).await,
    };

    // Full error text goes to the log; stderr only gets the public message
    if let Err(e) = &result {
        if e.kind().is_client_error() {
            tracing::debug!(kind = %e.kind(), error = %e, "Command rejected");
        } else {
            tracing::error!(kind = %e.kind(), error = %e, "Command failed");
        }
    }

    // Late remote answers still get persisted before exit
    app.shutdown().await;
    result
}
