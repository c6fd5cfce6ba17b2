use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use seqpipe::cli::{Cli, Commands, OutputFormat};
use seqpipe::config::{self, QueryOutput};
use seqpipe::generators::range_step;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Run {
            file,
            values,
            format,
            timing,
        } => run_command(&file, values, format, timing),
        Commands::Check { file } => check_command(&file),
        Commands::Range { start, end, step } => {
            let values = range_step(start, end, step);
            println!("{}", QueryOutput::Sequence(values));
            Ok(())
        }
    }
}

/// Logs go to stderr so query results on stdout stay parseable.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_command(
    file: &Path,
    values: Option<Vec<i64>>,
    format: OutputFormat,
    timing: bool,
) -> Result<()> {
    let query = config::load_query(file)?;
    let pipeline = query
        .build()
        .with_context(|| format!("cannot assemble query {}", file.display()))?;
    let input = values.unwrap_or_else(|| query.input.generate());

    let (output, timings) = if timing {
        config::run_pipeline_timed(&pipeline, input)?
    } else {
        (config::run_pipeline(&pipeline, input)?, Vec::new())
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Terminal => {
            println!("{}", query.display_name().bold());
            println!("{} {}", format!("{}:", output.kind()).dimmed(), output);
        }
    }

    for timing in &timings {
        eprintln!("{}", timing.format());
    }
    Ok(())
}

fn check_command(file: &Path) -> Result<()> {
    let query = config::load_query(file)?;
    match query.build() {
        Ok(pipeline) => {
            println!("{} {}", "ok".green().bold(), query.display_name());
            for stage in pipeline.describe() {
                println!(
                    "  {:>2}. {:<12} {:<10} {} -> {}",
                    stage.position,
                    stage.name,
                    stage.kind.to_string(),
                    stage.input,
                    stage.output
                );
            }
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "invalid".red().bold(), query.display_name());
            Err(e).with_context(|| format!("cannot assemble query {}", file.display()))
        }
    }
}
