//! `recur` CLI — describe, normalize, and convert recurrence rules.
//!
//! ## Usage
//!
//! ```sh
//! # Summarize a rule object as emitted by a recurring-rule form
//! echo '{"freq":"WEEKLY","byweekday":["MO","FR"]}' | recur describe
//!
//! # Describe an RRULE string, without abbreviating names
//! echo 'FREQ=MONTHLY;BYDAY=TU;BYSETPOS=3' | recur describe --rrule --raw
//!
//! # Normalize arbitrary text
//! recur normalize "Monday, Tuesday, and Wednesday"
//! recur normalize --only months "until December 31, 2027"
//!
//! # Convert between the JSON rule object and RRULE text
//! recur to-rrule -i rule.json
//! recur parse -i rule.rrule -o rule.json
//! ```

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use recurrence_core::{text, RecurrenceRule};
use std::io::{self, Read};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "recur",
    version,
    about = "Describe, normalize, and convert recurrence rules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the human-readable summary of a rule
    Describe {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Treat the input as RRULE text instead of a JSON rule object
        #[arg(long)]
        rrule: bool,
        /// Print the sentence with full weekday/month names
        #[arg(long)]
        raw: bool,
    },
    /// Abbreviate weekday/month names and tidy "and" phrasing
    Normalize {
        /// Text to normalize (reads from stdin if omitted)
        text: Option<String>,
        /// Apply a single step instead of all three
        #[arg(long, value_enum)]
        only: Option<Step>,
    },
    /// Convert a JSON rule object to validated RRULE text
    ToRrule {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse RRULE text into a JSON rule object
    Parse {
        /// Input RRULE file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Step {
    Weekdays,
    Months,
    Conjunctions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Describe {
            input,
            output,
            rrule,
            raw,
        } => {
            let source = read_input(input.as_deref())?;
            let rule = if rrule {
                recurrence_core::parse_rrule(source.trim()).context("Failed to parse RRULE")?
            } else {
                RecurrenceRule::from_json(&source).context("Failed to parse rule JSON")?
            };
            debug!(freq = rule.frequency_str(), "loaded rule");

            let sentence = if raw {
                recurrence_core::describe(&rule)
            } else {
                recurrence_core::summarize(&rule)
            }
            .context("Failed to describe rule")?;

            write_output(output.as_deref(), &format!("{}\n", sentence))?;
        }
        Commands::Normalize { text: arg, only } => {
            let source = match arg {
                Some(s) => s,
                None => read_input(None)?,
            };
            let normalized = match only {
                None => text::normalize(&source),
                Some(Step::Weekdays) => text::abbreviate_weekdays(&source),
                Some(Step::Months) => text::abbreviate_months(&source),
                Some(Step::Conjunctions) => text::cleanup_conjunctions(&source),
            };
            print!("{}", normalized);
            if !normalized.ends_with('\n') {
                println!();
            }
        }
        Commands::ToRrule { input, output } => {
            let source = read_input(input.as_deref())?;
            let rule = RecurrenceRule::from_json(&source).context("Failed to parse rule JSON")?;
            recurrence_core::validate(&rule).context("Rule failed validation")?;
            let rrule =
                recurrence_core::to_rrule_string(&rule).context("Failed to serialize rule")?;
            info!(rrule = %rrule, "converted rule");
            write_output(output.as_deref(), &format!("{}\n", rrule))?;
        }
        Commands::Parse { input, output } => {
            let source = read_input(input.as_deref())?;
            let rule = recurrence_core::parse_rrule(&source).context("Failed to parse RRULE")?;
            let pretty = serde_json::to_string_pretty(&rule)?;
            write_output(output.as_deref(), &format!("{}\n", pretty))?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
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
