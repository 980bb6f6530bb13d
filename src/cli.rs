use crate::env::EnvLookup;
use crate::error::ConfigError;
use crate::server::ServerDeploymentConfigProvider;
use crate::surface::{ConfigSurface, render};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "deploy-config", about = "Emit deployment configuration for external tools")]
pub struct Cli {
    /// Write the document to this file instead of stdout.
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    /// Single-line JSON regardless of DEPLOY_CONFIG_PRETTY.
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Migration tool input (requires DATABASE_URL_EXTERNAL).
    Migration,
    /// Web server build input.
    Server,
    /// Check a URL against the remote image allowlist.
    CheckImage { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Emitted,
    ImageAllowed,
    ImageDenied,
}

pub fn run(
    cli: &Cli,
    env: &impl EnvLookup,
    pretty: bool,
    stdout: &mut impl Write,
) -> Result<Outcome, ConfigError> {
    let surface = match &cli.command {
        Command::Migration => ConfigSurface::Migration,
        Command::Server => ConfigSurface::Server,
        Command::CheckImage { url } => {
            let url = Url::parse(url)?;
            let allowed = ServerDeploymentConfigProvider::load().allows_remote_image(&url);
            writeln!(stdout, "{}", if allowed { "allowed" } else { "denied" })?;
            return Ok(if allowed {
                Outcome::ImageAllowed
            } else {
                Outcome::ImageDenied
            });
        }
    };

    let doc = render(surface, env, pretty && !cli.compact)?;
    match cli.out.as_ref() {
        Some(path) => {
            std::fs::write(path, format!("{doc}\n"))?;
            info!(path = %path.display(), ?surface, "configuration written");
        }
        None => writeln!(stdout, "{doc}")?,
    }
    Ok(Outcome::Emitted)
}
