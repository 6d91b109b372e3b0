//! foldprep CLI
//!
//! Command-line entry point for preparing shuffled train/test folds
//! from labeled directory datasets.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use foldprep::utils::logging::{init_logging, LogConfig};
use foldprep::{
    run_baseline, run_unique, ProgressBarSink, RelocateMode, RunSummary, SplitConfig,
    DEFAULT_SEED, DEFAULT_TRAIN_FRACTION,
};

/// Shuffled train/test fold preparation for labeled directory datasets
#[derive(Parser, Debug)]
#[command(name = "foldprep")]
#[command(version)]
#[command(about = "Shuffled train/test fold preparation for labeled directory datasets", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, default_value = "false")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct SplitArgs {
    /// Origin dataset directory holding Labels.txt and numbered sample
    /// directories
    origin_dir: PathBuf,

    /// Output directory for the fold_<n> subtrees
    out_dir: PathBuf,

    /// Number of folds to create
    fold_count: usize,

    /// Fraction of samples assigned to each fold's train subtree
    #[arg(default_value_t = DEFAULT_TRAIN_FRACTION)]
    train_fraction: f64,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Move sample directories instead of copying them. DESTRUCTIVE:
    /// consumes the origin dataset; a mid-run failure leaves origin and
    /// output both partially populated with no automatic recovery
    #[arg(long, default_value = "false")]
    move_samples: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create independently shuffled folds (fold 0 keeps the origin
    /// ordering; test sets may overlap across folds)
    Split(SplitArgs),

    /// Create folds whose test sets are pairwise disjoint; the fold
    /// count is capped at floor(1 / (1 - train_fraction))
    Unique(SplitArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else if cli.quiet {
        LogConfig::quiet()
    } else {
        LogConfig::default()
    };
    let _ = init_logging(&log_config);

    let summary = match cli.command {
        Commands::Split(args) => run(&args, false)?,
        Commands::Unique(args) => run(&args, true)?,
    };

    print_summary(&summary);
    Ok(())
}

fn run(args: &SplitArgs, unique: bool) -> Result<RunSummary> {
    let relocate = if args.move_samples {
        RelocateMode::Move
    } else {
        RelocateMode::Copy
    };

    let config = SplitConfig::new(args.fold_count, args.train_fraction)?
        .with_seed(args.seed)
        .with_relocate(relocate);

    info!(
        "Splitting '{}' into {} fold(s) at train fraction {}",
        args.origin_dir.display(),
        args.fold_count,
        args.train_fraction
    );

    let mut progress = ProgressBarSink::new();
    let summary = if unique {
        run_unique(&args.origin_dir, &args.out_dir, &config, &mut progress)?
    } else {
        run_baseline(&args.origin_dir, &args.out_dir, &config, &mut progress)?
    };

    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", "Split complete!".green().bold());
    println!("  Mode:           {}", summary.mode);
    println!("  Folds:          {}", summary.fold_count);
    println!("  Total samples:  {}", summary.total_samples);
    println!("  Train fraction: {}", summary.train_fraction);
    println!("  Seed:           {}", summary.seed);
    for fold in &summary.folds {
        println!(
            "  fold_{}: {} train / {} test",
            fold.fold, fold.train, fold.test
        );
    }
}
