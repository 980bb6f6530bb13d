use clap::Parser;
use deploy_config::ConfigError;
use deploy_config::cli::{Cli, Outcome, run};
use deploy_config::config::Settings;
use deploy_config::env::ProcessEnv;
use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("deploy-config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    debug!(loglevel = %settings.loglevel, pretty = settings.pretty, command = ?cli.command);

    let mut stdout = std::io::stdout().lock();
    match run(&cli, &ProcessEnv, settings.pretty, &mut stdout) {
        Ok(Outcome::Emitted) | Ok(Outcome::ImageAllowed) => ExitCode::SUCCESS,
        Ok(Outcome::ImageDenied) => ExitCode::FAILURE,
        Err(e @ ConfigError::UrlParse(_)) => {
            eprintln!("deploy-config: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "configuration load failed");
            eprintln!("deploy-config: {e}");
            ExitCode::FAILURE
        }
    }
}
