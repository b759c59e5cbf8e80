//! Command-line argument parsing for the datagen CLI
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Duration;

/// datagen - Execute Datagen tools from the terminal
#[derive(Parser, Debug)]
#[command(name = "datagen")]
#[command(version)]
#[command(about = "Execute Datagen tools from the terminal", long_about = None)]
pub struct Args {
    /// API key (falls back to the DATAGEN_API_KEY environment variable)
    #[arg(long, env = "DATAGEN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the Datagen API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Extra attempts after a transient failure
    #[arg(long)]
    pub retries: Option<u32>,

    /// Delay before the first retry in seconds (doubles each retry)
    #[arg(long, value_name = "SECS")]
    pub backoff: Option<f64>,

    /// Settings file path (default: ~/.datagen/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except the result)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a tool and print its result as JSON
    Exec {
        /// Tool alias (e.g., mcp_Linear_list_issues)
        #[arg(value_name = "TOOL")]
        tool: String,

        /// Parameters as a JSON object
        #[arg(long, value_name = "JSON")]
        params: Option<String>,

        /// Single parameter as key=value; value is parsed as JSON when possible
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        param: Vec<String>,
    },

    /// Display the effective configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Timeout flag as a duration
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Backoff flag as a duration
    pub fn backoff_duration(&self) -> Result<Option<Duration>, String> {
        self.backoff
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .map_err(|_| format!("Invalid backoff: {} seconds", secs))
            })
            .transpose()
    }
}

impl Verbosity {
    /// Default log filter directive for this level
    pub fn log_directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Check if should show status lines besides the result
    pub fn show_status(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}

/// Merge `--params` and `-p key=value` pairs into one parameter object.
/// Later pairs override keys from `--params`.
pub fn parse_parameters(params: Option<&str>, pairs: &[String]) -> Result<Map<String, Value>, String> {
    let mut map = match params {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err("--params must be a JSON object".to_string()),
            Err(e) => return Err(format!("Invalid --params JSON: {}", e)),
        },
        None => Map::new(),
    };

    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected KEY=VALUE, got '{}'", pair))?;
        if key.is_empty() {
            return Err(format!("Empty parameter name in '{}'", pair));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_verbosity_quiet() {
        let args = parse(&["datagen", "-q", "config"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let args = parse(&["datagen", "config"]);
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_very_verbose() {
        let args = parse(&["datagen", "exec", "t", "-vv"]);
        assert_eq!(args.verbosity(), Verbosity::VeryVerbose);
        assert_eq!(args.verbosity().log_directive(), "debug");
    }

    #[test]
    fn test_exec_arguments() {
        let args = parse(&[
            "datagen",
            "--retries",
            "3",
            "--backoff",
            "0.25",
            "exec",
            "mcp_Linear_list_issues",
            "-p",
            "limit=10",
        ]);
        assert_eq!(args.retries, Some(3));
        assert_eq!(args.backoff_duration().unwrap(), Some(Duration::from_millis(250)));
        match args.command {
            Commands::Exec { tool, param, params } => {
                assert_eq!(tool, "mcp_Linear_list_issues");
                assert_eq!(param, vec!["limit=10".to_string()]);
                assert!(params.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_backoff_rejected() {
        let args = parse(&["datagen", "--backoff=-1", "config"]);
        assert!(args.backoff_duration().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Args::try_parse_from(["datagen", "--timeout", "0", "config"]).is_err());

        let args = parse(&["datagen", "--timeout", "15", "config"]);
        assert_eq!(args.timeout_duration(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["datagen"]).is_err());
    }

    #[test]
    fn test_parse_parameters() {
        let map = parse_parameters(
            Some(r#"{"limit": 5, "order_by": "createdAt"}"#),
            &["limit=10".to_string(), "team=core".to_string(), "flags=[1,2]".to_string()],
        )
        .unwrap();

        assert_eq!(
            Value::Object(map),
            json!({"limit": 10, "order_by": "createdAt", "team": "core", "flags": [1, 2]})
        );
    }

    #[test]
    fn test_parse_parameters_errors() {
        assert!(parse_parameters(Some("[1]"), &[]).is_err());
        assert!(parse_parameters(Some("{oops"), &[]).is_err());
        assert!(parse_parameters(None, &["novalue".to_string()]).is_err());
        assert!(parse_parameters(None, &["=1".to_string()]).is_err());
    }

    #[test]
    fn test_parse_parameters_empty() {
        assert!(parse_parameters(None, &[]).unwrap().is_empty());
    }
}
