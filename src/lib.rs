pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod migration;
pub mod server;
pub mod surface;

pub use error::ConfigError;
pub use migration::{MigrationConfig, MigrationConfigProvider};
pub use server::{ServerDeploymentConfig, ServerDeploymentConfigProvider};
