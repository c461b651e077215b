use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use ship_lineup::config::Settings;
use ship_lineup::ops::telemetry;
use ship_lineup::service::{serve, AppState, ResponseOptions};

mod cli;

use cli::{Cli, Commands, DumpArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("! Invalid configuration: {e}");
            return ExitCode::from(2);
        }
    };
    telemetry::init(settings.log_format);

    let state = match AppState::from_settings(settings) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!(error = %e, "Failed to build upstream client");
            return ExitCode::from(2);
        }
    };

    match cli.command() {
        Commands::Serve => run_server(state).await,
        Commands::Dump(args) => dump(&state, &args).await,
    }
}

async fn run_server(state: Arc<AppState>) -> ExitCode {
    info!(
        upstream = %state.settings.upstream_url,
        layout = ?state.settings.positional_layout,
        "Ship lineup service starting"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
    };

    match serve(state, shutdown).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}

async fn dump(state: &AppState, args: &DumpArgs) -> ExitCode {
    let result = match state.fetch_and_refine().await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Upstream failure");
            return ExitCode::FAILURE;
        }
    };

    let options = ResponseOptions {
        pretty: args.pretty,
        include_raw: args.raw,
    };
    match state.render(&result, options) {
        Ok(body) => {
            println!("{body}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to serialise envelope");
            ExitCode::FAILURE
        }
    }
}
