use clap::Parser;
use estate_pay::config::{Cli, Command};
use estate_pay::startup;
use estate_pay::telemetry::init_tracing;
use miette::{IntoDiagnostic, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    match cli.command {
        Command::Serve(args) => startup::serve(args).await.into_diagnostic()?,
        Command::Export(args) => startup::export(args).await.into_diagnostic()?,
        Command::Pricing(args) => startup::pricing(args).into_diagnostic()?,
    }

    Ok(())
}
