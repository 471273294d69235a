//! Cover and pairwise stages.

use std::path::Path;
use std::sync::Arc;

use divmine_core::errors::{DatasetError, PipelineError};

use super::context::StageContext;
use crate::coverage::{CoverBatchScheduler, CoverReport, CoverageIndex};
use crate::io::{read_dataset, read_pattern_list, read_results, write_json, write_results};
use crate::similarity::{PairwiseEngine, PairwiseOutcome};

fn require(path: &Path) -> Result<(), DatasetError> {
    if path.exists() {
        Ok(())
    } else {
        Err(DatasetError::FileNotFound {
            path: path.display().to_string(),
        })
    }
}

/// Compute the cover of every pattern in `patterns_path` against
/// `dataset_path` and write them to `output_path`.
///
/// Both inputs are checked before anything is read or written.
pub fn cover_stage(
    ctx: &StageContext,
    patterns_path: &Path,
    dataset_path: &Path,
    output_path: &Path,
) -> Result<CoverReport, PipelineError> {
    require(dataset_path)?;
    require(patterns_path)?;

    let patterns = Arc::new(read_pattern_list(patterns_path)?);
    let dataset = Arc::new(read_dataset(dataset_path)?);

    let index = CoverageIndex::new(dataset);
    let scheduler = CoverBatchScheduler::new(ctx.covers.clone());
    let report = scheduler.compute_all_covers(&index, patterns, &ctx.cancel)?;

    write_results(output_path, &report.covers)?;
    tracing::info!(output = %output_path.display(), patterns = report.covers.len(), "cover stage complete");
    Ok(report)
}

/// Compute pairwise similarities for the covers in `solution_path`.
///
/// The JSON table is written to `output_path` only when computed; a
/// ceiling skip returns [`PairwiseOutcome::Skipped`] and writes nothing.
pub fn pairwise_stage(
    ctx: &StageContext,
    solution_path: &Path,
    output_path: &Path,
    limit: Option<usize>,
) -> Result<PairwiseOutcome, PipelineError> {
    let outcome = compute_pairwise_for(ctx, solution_path, limit)?;
    if let Some(table) = outcome.table() {
        write_json(output_path, table)?;
        tracing::info!(output = %output_path.display(), pairs = table.len(), "pairwise stage complete");
    }
    Ok(outcome)
}

/// Read `solution_path` and compute its pairwise table without writing it.
pub(crate) fn compute_pairwise_for(
    ctx: &StageContext,
    solution_path: &Path,
    limit: Option<usize>,
) -> Result<PairwiseOutcome, PipelineError> {
    let covers: Vec<_> = read_results(solution_path)?
        .into_iter()
        .map(|(_, cover)| Arc::new(cover))
        .collect();

    let engine = PairwiseEngine::new(ctx.pairwise.clone());
    Ok(engine.compute_pairwise(covers, limit, &ctx.cancel)?)
}
