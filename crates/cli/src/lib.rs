pub mod app;
pub mod config;

pub use app::{CliApp, ExitCode};
pub use config::{OutputFormat, SolResolveConfig};
