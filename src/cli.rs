use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seqpipe")]
#[command(about = "Run composable sequence queries", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a query file and print its result
    Run {
        /// Query file (TOML)
        file: PathBuf,

        /// Replace the query's input with these values
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        values: Option<Vec<i64>>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Report the time spent in each stage
        #[arg(long)]
        timing: bool,
    },

    /// Assemble a query file and show its stages without running it
    Check {
        /// Query file (TOML)
        file: PathBuf,
    },

    /// Print a generated range of integers
    Range {
        #[arg(allow_hyphen_values = true)]
        start: i64,

        /// Exclusive end of the range
        #[arg(allow_hyphen_values = true)]
        end: i64,

        /// Distance between consecutive values
        #[arg(long, default_value = "1")]
        step: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}
