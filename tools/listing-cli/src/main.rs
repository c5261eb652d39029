//! Listings CLI - inspect listing snapshots with the filter engine.
//!
//! Commands:
//! - `listings detect` - Show which schema field carries each metric
//! - `listings counts` - Bucket and term counts for badges
//! - `listings filter` - Apply a query and list matching listings
//! - `listings validate-range` - Check a custom min/max range

mod commands;
mod context;
mod output;
mod snapshot;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CountsArgs, DetectArgs, FilterArgs, ValidateRangeArgs};

/// Listings CLI - classify and filter marketplace listings
#[derive(Parser)]
#[command(name = "listings")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (engine debug logs on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Engine config file path (bucket tables, currency, theme)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the field detected for each metric family
    Detect(DetectArgs),

    /// Count listings per bucket or term
    Counts(CountsArgs),

    /// Filter listings and show what matched
    Filter(FilterArgs),

    /// Validate a custom range
    ValidateRange(ValidateRangeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Detect(args) => commands::detect::run(args, &ctx),
        Commands::Counts(args) => commands::counts::run(args, &ctx),
        Commands::Filter(args) => commands::filter::run(args, &ctx),
        Commands::ValidateRange(args) => commands::validate_range::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
