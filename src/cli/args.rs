//! Command-line argument definitions for the airport weather store
//!
//! This module defines the CLI interface using clap derive API. Every
//! command seeds a fresh in-memory store from an airports.dat file, so the
//! CLI is a way to exercise the store against real data without a server.

use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the airport weather store
#[derive(Debug, Clone, Parser)]
#[command(
    name = "airport-weather",
    version,
    about = "Query airport weather readings held in an in-memory store",
    long_about = "Seeds an in-memory airport weather store from an airports.dat file, optionally \
                  applies measurement updates, and runs radius queries or prints the usage \
                  statistics snapshot."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only show errors"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load an airports file and report what was registered
    Load(StoreArgs),
    /// Run a radius query against a seeded store
    Query(QueryArgs),
    /// Print the health and usage snapshot of a seeded store
    Ping(PingArgs),
}

/// Arguments shared by every command for building the store
#[derive(Debug, Clone, ClapArgs)]
pub struct StoreArgs {
    /// Airports file in OpenFlights airports.dat layout
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: PathBuf,

    /// JSON store configuration file
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON array of measurement updates to apply after loading
    ///
    /// Each element is {"iata": "JFK", "kind": "wind", "point": {"mean": 22.0, ...}}
    #[arg(short = 'm', long = "measurements", value_name = "PATH")]
    pub measurements: Option<PathBuf>,
}

/// Arguments for the query command
#[derive(Debug, Clone, ClapArgs)]
pub struct QueryArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// IATA code of the airport to query around
    #[arg(short = 'i', long = "iata", value_name = "CODE")]
    pub iata: String,

    /// Radius in kilometres (blank means 0)
    #[arg(short = 'r', long = "radius", value_name = "KM", default_value = "0")]
    pub radius: String,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for the ping command
#[derive(Debug, Clone, ClapArgs)]
pub struct PingArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Queries to run before taking the snapshot, as IATA:RADIUS pairs
    #[arg(long = "query", value_name = "IATA:RADIUS", value_delimiter = ',')]
    pub queries: Vec<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Output formats for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
    /// Human readable summary
    Summary,
}

impl Args {
    /// Get the log level from verbose/quiet flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl StoreArgs {
    /// Validate store arguments
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::bad_request(format!(
                "{} is not a valid input: file does not exist",
                self.file.display()
            )));
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(Error::configuration(format!(
                    "Configuration file {} does not exist",
                    config.display()
                )));
            }
        }
        Ok(())
    }
}

/// Split an `IATA:RADIUS` pair
pub fn parse_query_pair(pair: &str) -> Result<(String, String)> {
    match pair.split_once(':') {
        Some((iata, radius)) => Ok((iata.trim().to_string(), radius.trim().to_string())),
        None => Err(Error::bad_request(format!(
            "Invalid query '{}': expected IATA:RADIUS",
            pair
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_command() {
        let args = Args::try_parse_from([
            "airport-weather",
            "query",
            "--file",
            "airports.dat",
            "--iata",
            "JFK",
            "--radius",
            "200",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "debug");
        match args.command {
            Some(Commands::Query(query)) => {
                assert_eq!(query.iata, "JFK");
                assert_eq!(query.radius, "200");
                assert_eq!(query.format, OutputFormat::Json);
                assert_eq!(query.store.file, PathBuf::from("airports.dat"));
            }
            other => panic!("expected query command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ping_queries() {
        let args = Args::try_parse_from([
            "airport-weather",
            "ping",
            "-f",
            "airports.dat",
            "--query",
            "BOS:0,JFK:200",
            "-q",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
        match args.command {
            Some(Commands::Ping(ping)) => assert_eq!(ping.queries, vec!["BOS:0", "JFK:200"]),
            other => panic!("expected ping command, got {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["airport-weather", "-q", "-v", "load", "-f", "a.dat"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_query_pair() {
        assert_eq!(
            parse_query_pair("JFK:200").unwrap(),
            ("JFK".to_string(), "200".to_string())
        );
        assert_eq!(
            parse_query_pair("BOS:").unwrap(),
            ("BOS".to_string(), String::new())
        );
        assert!(parse_query_pair("JFK").is_err());
    }

    #[test]
    fn test_store_args_missing_file() {
        let store = StoreArgs {
            file: PathBuf::from("/nonexistent/airports.dat"),
            config: None,
            measurements: None,
        };
        assert!(store.validate().is_err());
    }
}
