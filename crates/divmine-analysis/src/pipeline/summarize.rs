//! Folder-level summarization of solution files.

use std::fs;
use std::path::{Path, PathBuf};

use divmine_core::constants::{
    AVERAGE_FILE_SUFFIX, CDF_FILE_SUFFIX, PAIRWISE_EXTENSION, SOLUTION_EXTENSION,
};
use divmine_core::errors::{DatasetError, PipelineError, PipelineResult};

use super::context::StageContext;
use super::stages::compute_pairwise_for;
use crate::io::write_json;
use crate::similarity::PairwiseOutcome;
use crate::summary::{to_cdf, to_iterated_average};

/// What happened to one solution file.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryStatus {
    Written {
        pairwise: PathBuf,
        cdf: PathBuf,
        average: PathBuf,
        pairs: usize,
    },
    Skipped {
        pattern_count: usize,
        ceiling: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionSummary {
    pub solution: PathBuf,
    pub status: SummaryStatus,
}

/// Produce `<stem>.par`, `<stem>-fullCDF.gph` and `<stem>-average.gph`
/// in `output_folder` for one solution file.
///
/// On failure no output file is written.
pub fn summarize_solution(
    ctx: &StageContext,
    solution_path: &Path,
    output_folder: &Path,
) -> Result<SolutionSummary, PipelineError> {
    let stem = solution_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let pairwise_path = output_folder.join(format!("{stem}.{PAIRWISE_EXTENSION}"));

    let table = match compute_pairwise_for(ctx, solution_path, None)? {
        PairwiseOutcome::Computed(table) => table,
        PairwiseOutcome::Skipped {
            pattern_count,
            ceiling,
        } => {
            return Ok(SolutionSummary {
                solution: solution_path.to_path_buf(),
                status: SummaryStatus::Skipped {
                    pattern_count,
                    ceiling,
                },
            });
        }
    };

    let cdf = to_cdf(&table.values(), ctx.summary.cdf_resolution)?;
    let average = to_iterated_average(&table, ctx.summary.average_horizon)?;

    // Nothing is written unless both curves could be computed.
    let cdf_path = output_folder.join(format!("{stem}{CDF_FILE_SUFFIX}"));
    let average_path = output_folder.join(format!("{stem}{AVERAGE_FILE_SUFFIX}"));
    write_json(&pairwise_path, &table)?;
    write_json(&cdf_path, &cdf)?;
    write_json(&average_path, &average)?;

    Ok(SolutionSummary {
        solution: solution_path.to_path_buf(),
        status: SummaryStatus::Written {
            pairwise: pairwise_path,
            cdf: cdf_path,
            average: average_path,
            pairs: table.len(),
        },
    })
}

/// Summarize every `*.sol` file in `input_folder`, in name order.
///
/// A missing folder is fatal; failures of individual files are collected.
pub fn summarize_folder(
    ctx: &StageContext,
    input_folder: &Path,
    output_folder: &Path,
) -> Result<PipelineResult<Vec<SolutionSummary>>, PipelineError> {
    let entries = fs::read_dir(input_folder).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DatasetError::FileNotFound {
            path: input_folder.display().to_string(),
        },
        _ => DatasetError::Io {
            path: input_folder.display().to_string(),
            message: e.to_string(),
        },
    })?;

    let mut solutions: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == SOLUTION_EXTENSION)
        })
        .collect();
    solutions.sort();

    tracing::info!(folder = %input_folder.display(), solutions = solutions.len(), "summarizing folder");

    let mut result = PipelineResult::new(Vec::with_capacity(solutions.len()));
    for solution in solutions {
        match summarize_solution(ctx, &solution, output_folder) {
            Ok(summary) => result.data.push(summary),
            Err(e) => {
                tracing::warn!(solution = %solution.display(), error = %e, "solution summary failed");
                result.add_error(solution.display().to_string(), e);
            }
        }
    }
    Ok(result)
}
