//! CLI definitions for the `menubot` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Restaurant menu backend with conversational dish recommendations.
#[derive(Parser)]
#[command(name = "menubot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory holding `config.toml`, the database and uploads.
    #[arg(long, global = true, env = "MENUBOT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `server.port`).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the effective configuration as JSON.
    Config,
}

impl Cli {
    /// Default log filter for the chosen verbosity. `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,menubot=debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_overrides_parse() {
        let cli = Cli::parse_from(["menubot", "serve", "--host", "127.0.0.1", "-p", "8080"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            Commands::Config => panic!("expected serve"),
        }
    }

    #[test]
    fn test_verbosity_filters() {
        assert_eq!(Cli::parse_from(["menubot", "config"]).log_filter(), "info");
        assert_eq!(Cli::parse_from(["menubot", "--quiet", "config"]).log_filter(), "error");
        assert_eq!(Cli::parse_from(["menubot", "-v", "config"]).log_filter(), "info,menubot=debug");
        assert_eq!(Cli::parse_from(["menubot", "-vv", "serve"]).log_filter(), "trace");
    }
}
