//! Subcommand handlers. Each prints a short report on stdout.

use std::path::{Path, PathBuf};

use divmine_analysis::pipeline::{
    cover_stage, pairwise_stage, summarize_folder, StageContext, SummaryStatus,
};
use divmine_analysis::PairwiseOutcome;
use divmine_core::constants::SOLUTION_EXTENSION;
use divmine_core::errors::{DivmineErrorCode, PipelineError};
use divmine_core::DivmineConfig;

pub fn covers(
    config: &DivmineConfig,
    patterns: &Path,
    dataset: &Path,
    output: Option<PathBuf>,
) -> Result<(), PipelineError> {
    let output = output.unwrap_or_else(|| patterns.with_extension(SOLUTION_EXTENSION));
    let ctx = StageContext::from_config(config);
    let report = cover_stage(&ctx, patterns, dataset, &output)?;
    println!(
        "{} covers written to {} ({} batches on up to {} workers, {} item scans, {} ms)",
        report.covers.len(),
        output.display(),
        report.batches,
        report.max_active,
        report.item_scans,
        report.duration.as_millis()
    );
    Ok(())
}

pub fn pairwise(
    config: &DivmineConfig,
    solution: &Path,
    output: &Path,
    limit: Option<usize>,
) -> Result<(), PipelineError> {
    let ctx = StageContext::from_config(config);
    match pairwise_stage(&ctx, solution, output, limit)? {
        PairwiseOutcome::Computed(table) => {
            println!("{} pairs written to {}", table.len(), output.display());
        }
        PairwiseOutcome::Skipped {
            pattern_count,
            ceiling,
        } => {
            tracing::warn!(
                solution = %solution.display(),
                pattern_count,
                ceiling,
                "pairwise skipped, pass --limit to compare a prefix"
            );
        }
    }
    Ok(())
}

pub fn summarize(
    config: &DivmineConfig,
    input_folder: &Path,
    output_folder: Option<PathBuf>,
) -> Result<(), PipelineError> {
    let output_folder = output_folder.unwrap_or_else(|| input_folder.to_path_buf());
    let ctx = StageContext::from_config(config);
    let result = summarize_folder(&ctx, input_folder, &output_folder)?;

    for summary in &result.data {
        match &summary.status {
            SummaryStatus::Written { pairs, .. } => {
                println!("{}: {} pairs summarized", summary.solution.display(), pairs);
            }
            SummaryStatus::Skipped {
                pattern_count,
                ceiling,
            } => {
                println!(
                    "{}: skipped ({} patterns > {})",
                    summary.solution.display(),
                    pattern_count,
                    ceiling
                );
            }
        }
    }
    // Per-file failures do not fail the run.
    for (source, error) in &result.errors {
        eprintln!("{source}: {}", error.diagnostic());
    }
    Ok(())
}
