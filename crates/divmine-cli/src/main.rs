//! divmine CLI
//!
//! # Commands
//!
//! - `covers`: compute the cover of every pattern against a dataset
//! - `pairwise`: pairwise Jaccard similarity of a solution file
//! - `summarize`: pairwise, CDF and iterated-average files for a folder
//!
//! Exit status is 1 on a fatal error, 0 otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use divmine_core::config::CliOverrides;
use divmine_core::constants::VERSION;
use divmine_core::errors::DivmineErrorCode;
use divmine_core::tracing::init_tracing;
use divmine_core::DivmineConfig;

mod commands;

/// Diversity statistics for mined itemsets.
#[derive(Parser)]
#[command(name = "divmine")]
#[command(version = VERSION)]
#[command(about = "Coverage, pairwise Jaccard diversity and similarity distributions for mined itemsets")]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    overrides: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Flags that override `divmine.toml` and `DIVMINE_*` values.
#[derive(Args, Debug)]
struct GlobalArgs {
    /// Directory searched for `divmine.toml`
    #[arg(long, global = true, default_value = ".")]
    project_root: PathBuf,

    /// Patterns per cover batch
    #[arg(long, global = true)]
    batch_size: Option<usize>,

    /// Concurrent cover workers
    #[arg(long, global = true)]
    cover_workers: Option<usize>,

    /// Concurrent pairwise workers
    #[arg(long, global = true)]
    pairwise_workers: Option<usize>,

    /// Pattern ceiling above which pairwise comparison is skipped
    #[arg(long, global = true)]
    max_patterns: Option<usize>,

    /// Per-worker timeout in seconds, 0 disables it
    #[arg(long, global = true)]
    worker_timeout_secs: Option<u64>,

    /// Number of CDF sampling steps
    #[arg(long, global = true)]
    cdf_resolution: Option<usize>,

    /// Exclusive upper bound of k for the iterated average
    #[arg(long, global = true)]
    average_horizon: Option<usize>,
}

impl GlobalArgs {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            cover_batch_size: self.batch_size,
            cover_pool_capacity: self.cover_workers,
            pairwise_pool_capacity: self.pairwise_workers,
            pairwise_max_patterns: self.max_patterns,
            worker_timeout_secs: self.worker_timeout_secs,
            cdf_resolution: self.cdf_resolution,
            average_horizon: self.average_horizon,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the transactions covered by every pattern
    Covers {
        /// Pattern list, one pattern per line after a header line
        patterns: PathBuf,
        /// Transactional dataset, one transaction per line
        dataset: PathBuf,
        /// Result file (defaults to the pattern list with a `.sol` extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Pairwise Jaccard similarity of the covers in a solution file
    Pairwise {
        solution: PathBuf,
        output: PathBuf,
        /// Compare only the first N patterns and skip the pattern ceiling (0 means no limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Summarize every `.sol` file of a folder
    Summarize {
        input_folder: PathBuf,
        /// Where to write outputs (defaults to the input folder)
        #[arg(long)]
        output_folder: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let overrides = cli.overrides.cli_overrides();
    let config = match DivmineConfig::load(&cli.overrides.project_root, Some(&overrides)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.diagnostic());
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Covers {
            patterns,
            dataset,
            output,
        } => commands::covers(&config, &patterns, &dataset, output),
        Commands::Pairwise {
            solution,
            output,
            limit,
        } => commands::pairwise(&config, &solution, &output, limit),
        Commands::Summarize {
            input_folder,
            output_folder,
        } => commands::summarize(&config, &input_folder, output_folder),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.error_code(), error = %e, "command failed");
            eprintln!("{}", e.diagnostic());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "divmine",
            "pairwise",
            "run.sol",
            "run.par",
            "--limit",
            "50",
            "--pairwise-workers",
            "8",
            "--worker-timeout-secs",
            "0",
        ])
        .unwrap();
        let overrides = cli.overrides.cli_overrides();
        assert_eq!(overrides.pairwise_pool_capacity, Some(8));
        assert_eq!(overrides.worker_timeout_secs, Some(0));
        assert_eq!(overrides.cover_batch_size, None);
        assert!(matches!(cli.command, Commands::Pairwise { limit: Some(50), .. }));
    }

    #[test]
    fn covers_output_is_optional() {
        let cli = Cli::try_parse_from(["divmine", "covers", "p.txt", "d.dat"]).unwrap();
        assert!(matches!(cli.command, Commands::Covers { output: None, .. }));
        assert_eq!(cli.overrides.project_root, PathBuf::from("."));
    }
}
