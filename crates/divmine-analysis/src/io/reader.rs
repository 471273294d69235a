//! Readers for dataset, pattern-list, result and pairwise files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use divmine_core::errors::DatasetError;

use crate::coverage::CoverageSet;
use crate::dataset::{Dataset, Pattern, Transaction};
use crate::similarity::PairwiseTable;

/// Open `path`, mapping a missing file to [`DatasetError::FileNotFound`].
fn open(path: &Path) -> Result<BufReader<File>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, e: std::io::Error) -> DatasetError {
    DatasetError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn lines(path: &Path) -> Result<Vec<String>, DatasetError> {
    open(path)?
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io_error(path, e))
}

/// Read a transactional dataset, one transaction per line.
///
/// Blank lines and lines starting with `@`, `#` or `%` are skipped;
/// reading stops at a line equal to `[EOF]`.
pub fn read_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let mut transactions = Vec::new();
    for line in lines(path)? {
        let trimmed = line.trim();
        if trimmed == "[EOF]" {
            break;
        }
        if trimmed.is_empty() || trimmed.starts_with(['@', '#', '%']) {
            continue;
        }
        transactions.push(Transaction::parse(trimmed));
    }
    tracing::debug!(path = %path.display(), transactions = transactions.len(), "dataset loaded");
    Ok(Dataset::new(transactions))
}

/// Read a pattern list: the first line is a header, every following line
/// is one pattern (a blank line is the empty pattern).
pub fn read_pattern_list(path: &Path) -> Result<Vec<Pattern>, DatasetError> {
    let patterns: Vec<Pattern> = lines(path)?
        .iter()
        .skip(1)
        .map(|line| Pattern::parse(line))
        .collect();
    tracing::debug!(path = %path.display(), patterns = patterns.len(), "pattern list loaded");
    Ok(patterns)
}

/// Read a result file of `[ items ] [ indices ]` lines.
pub fn read_results(path: &Path) -> Result<Vec<(Pattern, CoverageSet)>, DatasetError> {
    let mut results = Vec::new();
    for (pos, line) in lines(path)?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed = parse_result_line(line).map_err(|message| DatasetError::MalformedLine {
            path: path.display().to_string(),
            line: pos + 1,
            message,
        })?;
        results.push(parsed);
    }
    Ok(results)
}

/// Parse `[ a b ] [ 1 3 ]`.
fn parse_result_line(line: &str) -> Result<(Pattern, CoverageSet), String> {
    let body = line
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| "expected `[ pattern ] [ cover ]`".to_string())?;
    let (pattern, cover) = body
        .split_once("] [")
        .ok_or_else(|| "missing `] [` separator".to_string())?;
    let indices = cover
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| format!("invalid transaction index `{token}`"))
        })
        .collect::<Result<Vec<u32>, String>>()?;
    Ok((Pattern::parse(pattern), CoverageSet::from_indices(indices)))
}

/// Load a pairwise JSON file written by [`super::write_json`].
pub fn read_pairwise(path: &Path) -> Result<PairwiseTable, DatasetError> {
    serde_json::from_reader(open(path)?).map_err(|e| DatasetError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_line_round() {
        let (p, c) = parse_result_line("[ a b ] [ 3 1 ]").unwrap();
        assert_eq!(p, Pattern::parse("a b"));
        assert_eq!(c.as_slice(), &[1, 3]);
    }

    #[test]
    fn empty_pattern_and_empty_cover() {
        let (p, c) = parse_result_line("[  ] [ 1 2 ]").unwrap();
        assert!(p.is_empty());
        assert_eq!(c.len(), 2);

        let (p, c) = parse_result_line("[ x ] [  ]").unwrap();
        assert_eq!(p.key(), "x");
        assert!(c.is_empty());
    }

    #[test]
    fn malformed_lines() {
        assert!(parse_result_line("a b 1 2").is_err());
        assert!(parse_result_line("[ a b ]").is_err());
        assert!(parse_result_line("[ a ] [ 1 two ]").is_err());
    }
}
