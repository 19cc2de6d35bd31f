//! # CLI Module
//!
//! Command-line front end for trying patterns against paths.
//!
//! ```bash
//! # Decode a path
//! pathextract extract --pattern 'X^users^IP' /api/users/42/avatar/large.png
//! [null,true,42,"avatar/large.png"]
//!
//! # Show how a pattern is read
//! pathextract explain 'X^users^IP'
//! 0    X  ignore
//! 1    ^  literal  users
//! 8    I  int
//! 9    P  path
//! ```
//!
//! Logs go to stderr; stdout only carries command output.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::extract::{extract, Directive, DirectiveCursor};
use crate::logging::{init_logging_with_config, LogConfig, LogFormat};

/// Command-line interface for pathextract
#[derive(Parser, Debug)]
#[command(name = "pathextract")]
#[command(version, about = "Extract typed values from URL path segments", long_about = None)]
pub struct Cli {
    /// Log level: trace/debug/info/warn/error
    #[arg(long, global = true, env = "PATHEXTRACT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log format: json/pretty
    #[arg(long, global = true, env = "PATHEXTRACT_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a path with a pattern and print the values as a JSON array
    Extract {
        /// Pattern string, e.g. `X^literal^ISBHdDeEP`
        #[arg(short, long)]
        pattern: String,

        /// URL path without scheme, host or query
        path: String,

        /// Indent the JSON output
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// List the directives of a pattern with their offsets
    Explain {
        /// Pattern string to read
        pattern: String,

        /// Print a JSON array instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// One row of `explain` output
#[derive(Debug, Serialize)]
pub struct DirectiveInfo<'p> {
    pub offset: usize,
    pub tag: char,
    pub name: &'static str,
    pub width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<&'p str>,
}

impl<'p> DirectiveInfo<'p> {
    fn new(offset: usize, directive: Directive<'p>) -> Self {
        let kind = directive.kind();
        Self {
            offset,
            tag: kind.tag(),
            name: kind.name(),
            width: directive.width(),
            literal: match directive {
                Directive::Literal(text) => Some(text),
                _ => None,
            },
        }
    }
}

/// Read every directive of `pattern`, failing on the first malformed one.
///
/// # Errors
///
/// Returns the cursor's error for an unclosed literal or unknown tag.
pub fn explain(pattern: &str) -> Result<Vec<DirectiveInfo<'_>>> {
    DirectiveCursor::new(pattern)
        .map(|item| {
            item.map(|(offset, directive)| DirectiveInfo::new(offset, directive))
                .with_context(|| format!("Invalid pattern '{pattern}'"))
        })
        .collect()
}

/// Execute a parsed command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if extraction fails, the pattern is invalid, or `out`
/// cannot be written.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Commands::Extract {
            pattern,
            path,
            pretty,
        } => {
            let matched = extract(path, pattern)
                .with_context(|| format!("Path '{path}' does not match pattern '{pattern}'"))?;
            info!(path = %path, values = matched.len(), "Extracted path");
            let json = matched.to_json()?;
            if *pretty {
                serde_json::to_writer_pretty(&mut *out, &json)?;
            } else {
                serde_json::to_writer(&mut *out, &json)?;
            }
            writeln!(out)?;
        }
        Commands::Explain { pattern, json } => {
            let directives = explain(pattern)?;
            if *json {
                serde_json::to_writer(&mut *out, &directives)?;
                writeln!(out)?;
            } else {
                for d in &directives {
                    match d.literal {
                        Some(text) => writeln!(out, "{:<4} {}  {}  {}", d.offset, d.tag, d.name, text)?,
                        None => writeln!(out, "{:<4} {}  {}", d.offset, d.tag, d.name)?,
                    }
                }
            }
        }
    }
    Ok(())
}

/// Parse arguments, set up logging and run the command against stdout.
///
/// # Errors
///
/// See [`run`]; also fails if logging cannot be initialized.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let mut config = LogConfig::from_env();
    config.log_level = cli.log_level.clone();
    config.format = LogFormat::parse(&cli.log_format);
    init_logging_with_config(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}
