//! # Mizan Main Entry Point
//!
//! Command-line client for the Quranic text analysis backend.

use anyhow::Result;
use mizan_client::{config::LOG_ENV_VAR, App, CommandLineArgs};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

const QUIET_DEPENDENCIES: &str = "reqwest=warn,hyper=warn,hyper_util=warn,rustls=warn,tokio=warn";

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose());

    tracing::debug!("Command: {:?}", cmd_args.command());
    let mut app = App::new(cmd_args)?;
    app.run().await
}

/// Log to stderr. `MIZAN_LOG` takes precedence; otherwise `--verbose`
/// selects debug and the default is warn.
fn init_tracing_subscriber(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},{QUIET_DEPENDENCIES}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
