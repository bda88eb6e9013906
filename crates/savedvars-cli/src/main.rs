//! `savedvars` CLI — inspect and convert SavedVariables files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Export a SavedVariables file as pretty-printed JSON
//! savedvars json -i WTF/Account/NAME/SavedVariables/MyAddon.lua
//!
//! # Compact JSON from stdin to a file
//! cat MyAddon.lua | savedvars json --compact -o MyAddon.json
//!
//! # Look up one value by dot path
//! savedvars get MyAddonDB.profiles.Default.scale -i MyAddon.lua
//!
//! # Rewrite in canonical client layout
//! savedvars fmt -i MyAddon.lua -o MyAddon.clean.lua
//!
//! # Show structure statistics
//! savedvars stats -i MyAddon.lua
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use savedvars_core::{ParseOptions, Root, Value, DEFAULT_MAX_DEPTH};
use serde::Serialize;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "savedvars",
    version,
    about = "Inspect and convert Lua SavedVariables files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum table nesting depth accepted by the parser
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the parsed file as JSON
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Print the value at a dot path (e.g. `MyAddonDB.profiles.Default`) as JSON
    Get {
        /// Dot-separated path starting with a top-level variable name
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Re-emit the file in canonical SavedVariables layout
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show structure statistics (variables, tables, entries, depth)
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ParseOptions::default().with_max_depth(cli.max_depth);

    match cli.command {
        Commands::Json {
            input,
            output,
            compact,
        } => {
            let root = load(input.as_deref(), options)?;
            let json = if compact {
                savedvars_core::to_json_string(&root)
            } else {
                savedvars_core::to_json_string_pretty(&root)
            }
            .context("Failed to serialize SavedVariables as JSON")?;
            write_output(output.as_deref(), &format!("{json}\n"))?;
        }
        Commands::Get { path, input } => {
            let root = load(input.as_deref(), options)?;
            let Some(value) = root.get(&path) else {
                anyhow::bail!("No value at path '{}'", path);
            };
            let json = serde_json::to_string_pretty(value)
                .with_context(|| format!("Failed to serialize value at '{}'", path))?;
            println!("{}", json);
        }
        Commands::Fmt { input, output } => {
            let root = load(input.as_deref(), options)?;
            write_output(
                output.as_deref(),
                &savedvars_core::to_savedvars_string(&root),
            )?;
        }
        Commands::Stats { input, json } => {
            let root = load(input.as_deref(), options)?;
            let stats = Stats::collect(&root);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Variables:  {}", stats.variables);
                println!("Tables:     {}", stats.tables);
                println!("Entries:    {}", stats.entries);
                println!("Max depth:  {}", stats.max_depth);
            }
        }
    }

    Ok(())
}

/// Install a stderr `tracing` subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Structure summary for the `stats` subcommand.
#[derive(Debug, Default, Serialize)]
struct Stats {
    variables: usize,
    tables: usize,
    entries: usize,
    max_depth: usize,
}

impl Stats {
    fn collect(root: &Root) -> Self {
        let mut stats = Stats {
            variables: root.len(),
            ..Stats::default()
        };
        for (_, value) in root.iter() {
            stats.visit(value, 0);
        }
        stats
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        if let Value::Table(table) = value {
            let depth = depth + 1;
            self.tables += 1;
            self.entries += table.len();
            self.max_depth = self.max_depth.max(depth);
            for (_, child) in table.iter() {
                self.visit(child, depth);
            }
        }
    }
}

/// Parse from a file path, or from stdin when no path is given.
fn load(path: Option<&str>, options: ParseOptions) -> Result<Root> {
    match path {
        Some(path) => savedvars_core::parse_file_with(path, options)
            .with_context(|| format!("Failed to parse file: {}", path)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            savedvars_core::parse_str_with(&buf, options).context("Failed to parse stdin")
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
