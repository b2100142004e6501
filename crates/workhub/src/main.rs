//! workhub - Entry Point
//!
//! CLI for the URI-scheme dispatched work provider registry.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `workhub get <uri>` | Retrieve an existing work and execute it |
//! | `workhub new <uri> [-o key=value]...` | Create a work and execute it |
//! | `workhub providers` | List the registered work providers |

// Force-link workhub-providers to ensure linkme registrations are included
extern crate workhub_providers;

mod config;
mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;

use workhub_domain::value_objects::WorkUri;

use crate::config::ConfigLoader;

/// Command line interface for workhub
#[derive(Parser, Debug)]
#[command(name = "workhub")]
#[command(about = "workhub - URI-scheme dispatched work provider registry")]
#[command(version)]
struct Cli {
    /// Path to configuration file (defaults to ./workhub.toml when present)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Retrieve an existing work for a URI and execute it
    Get {
        /// Work URI, e.g. hello:morning
        uri: String,
    },
    /// Create a work for a URI and execute it
    New {
        /// Work URI, e.g. hello:morning
        uri: String,
        /// Provider-specific option as key=value; repeatable
        #[arg(short = 'o', long = "option", value_parser = parse_key_val)]
        options: Vec<(String, String)>,
    },
    /// List the registered work providers
    Providers,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let app_config = loader.load()?;
    logging::init_logging(&app_config.logging)?;

    match cli.command {
        Command::Get { uri } => {
            let uri = WorkUri::parse(uri)?;
            let work = workhub_registry::get_work(&uri)
                .with_context(|| format!("cannot retrieve work '{uri}'"))?;
            work.execute()?;
        }
        Command::New { uri, options } => {
            let uri = WorkUri::parse(uri)?;
            let mut work_options = app_config.options_for(uri.routing_key());
            for (key, value) in options {
                work_options.insert(key, Value::String(value));
            }
            let work = workhub_registry::new_work(&uri, &work_options)
                .with_context(|| format!("cannot create work '{uri}'"))?;
            work.execute()?;
        }
        Command::Providers => {
            for (name, description) in workhub_registry::list_work_providers() {
                println!("{name:<12} {description}");
            }
        }
    }

    Ok(())
}

// Parses a -o key=value argument
fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_parsing() {
        assert_eq!(
            parse_key_val("greeting=Good morning").unwrap(),
            ("greeting".to_string(), "Good morning".to_string())
        );
        assert_eq!(
            parse_key_val("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_key_val("no-equals").is_err());
        assert!(parse_key_val("=value").is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::parse_from(["workhub", "new", "hello:x", "-o", "greeting=hi"]);
        match cli.command {
            Command::New { uri, options } => {
                assert_eq!(uri, "hello:x");
                assert_eq!(options, vec![("greeting".to_string(), "hi".to_string())]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
