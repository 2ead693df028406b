use std::process::ExitCode;

use clap::Parser;
use hooked::{
    AppContainer, Features, Settings,
    commands::{self, Cli},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match Settings::load(&cli.overrides) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "hooked={level},data={level},domain={level},presentation={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let container = match AppContainer::build(settings).await {
        Ok(container) => container,
        Err(err) => {
            tracing::error!("failed to start: {err}");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let features = Features::new();

    match commands::run(&container, &features, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
