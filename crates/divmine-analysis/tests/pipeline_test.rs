//! End-to-end stage tests over temporary files.

use std::fs;
use std::path::Path;

use divmine_analysis::io::{read_pairwise, read_results};
use divmine_analysis::pipeline::{
    cover_stage, pairwise_stage, summarize_folder, StageContext, SummaryStatus,
};
use divmine_analysis::similarity::PairwiseSettings;
use divmine_analysis::summary::{AveragePoint, CdfPoint};
use divmine_core::errors::{DatasetError, PipelineError};

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn small_context() -> StageContext {
    let mut ctx = StageContext::default();
    ctx.covers.batch_size = 2;
    ctx.covers.pool_capacity = 2;
    ctx.pairwise.pool_capacity = 2;
    ctx
}

#[test]
fn cover_stage_writes_result_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let dataset = dir.path().join("toy.dat");
    let patterns = dir.path().join("toy.txt");
    let output = dir.path().join("out").join("toy.sol");
    write(&dataset, "@attribute meta\na b\nb c\n\na c\n");
    write(&patterns, "header line\na\nb\na b\n\n");

    let report = cover_stage(&small_context(), &patterns, &dataset, &output).unwrap();
    assert_eq!(report.covers.len(), 4);

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec!["[ a ] [ 1 3 ]", "[ b ] [ 1 2 ]", "[ a b ] [ 1 ]", "[  ] [ 1 2 3 ]"]
    );

    let parsed = read_results(&output).unwrap();
    assert_eq!(parsed.len(), 4);
    assert!(parsed[3].0.is_empty());
}

#[test]
fn cover_stage_missing_input_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let patterns = dir.path().join("p.txt");
    let output = dir.path().join("p.sol");
    write(&patterns, "header\na\n");

    let err = cover_stage(
        &small_context(),
        &patterns,
        &dir.path().join("missing.dat"),
        &output,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Dataset(DatasetError::FileNotFound { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn pairwise_stage_writes_dash_keyed_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let solution = dir.path().join("s.sol");
    let output = dir.path().join("s.par");
    write(&solution, "[ a ] [ 1 3 ]\n[ b ] [ 1 2 ]\n[ a b ] [ 1 ]\n");

    let outcome = pairwise_stage(&small_context(), &solution, &output, None).unwrap();
    assert_eq!(outcome.table().unwrap().len(), 3);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let map = json.as_object().unwrap();
    assert_eq!(map.len(), 3);
    assert!(map.contains_key("1-0"));
    assert_eq!(map["2-0"].as_f64(), Some(50.0));

    let reloaded = read_pairwise(&output).unwrap();
    let computed = outcome.table().unwrap();
    assert_eq!(reloaded.len(), computed.len());
    for (key, value) in computed.iter() {
        let back = reloaded.get(key.row(), key.col()).unwrap();
        assert!((back - value).abs() < 1e-9, "{key}");
    }
}

#[test]
fn pairwise_stage_ceiling_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let solution = dir.path().join("big.sol");
    let output = dir.path().join("big.par");
    let lines: String = (0..12).map(|i| format!("[ i{i} ] [ {} ]\n", i + 1)).collect();
    write(&solution, &lines);

    let mut ctx = small_context();
    ctx.pairwise = PairwiseSettings {
        max_patterns: 10,
        ..ctx.pairwise
    };
    let outcome = pairwise_stage(&ctx, &solution, &output, None).unwrap();
    assert!(outcome.is_skipped());
    assert!(!output.exists());

    let limited = pairwise_stage(&ctx, &solution, &output, Some(4)).unwrap();
    assert_eq!(limited.table().unwrap().len(), 6);
    assert!(output.exists());
}

#[test]
fn summarize_folder_produces_all_files() {
    let dir = tempfile::TempDir::new().unwrap();
    write(
        &dir.path().join("run.sol"),
        "[ a ] [ 1 3 ]\n[ b ] [ 1 2 ]\n[ a b ] [ 1 ]\n",
    );
    write(&dir.path().join("ignored.txt"), "not a solution\n");

    let mut ctx = small_context();
    ctx.summary.cdf_resolution = 4;
    ctx.summary.average_horizon = 3;
    let result = summarize_folder(&ctx, dir.path(), dir.path()).unwrap();
    assert!(result.is_clean());
    assert_eq!(result.data.len(), 1);
    assert!(matches!(result.data[0].status, SummaryStatus::Written { pairs: 3, .. }));

    let cdf: Vec<CdfPoint> =
        serde_json::from_str(&fs::read_to_string(dir.path().join("run-fullCDF.gph")).unwrap()).unwrap();
    assert_eq!(cdf.len(), 5);
    assert_eq!(cdf[4], CdfPoint(100.0, 1.0));

    let average: Vec<AveragePoint> =
        serde_json::from_str(&fs::read_to_string(dir.path().join("run-average.gph")).unwrap()).unwrap();
    assert_eq!(average.len(), 2);
    assert_eq!(average[0].k(), 1);
    assert!(dir.path().join("run.par").exists());
}

#[test]
fn summarize_folder_collects_per_file_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    write(&dir.path().join("a_good.sol"), "[ a ] [ 1 ]\n[ b ] [ 1 2 ]\n");
    write(&dir.path().join("b_bad.sol"), "garbage line\n");
    write(&dir.path().join("c_single.sol"), "[ a ] [ 1 ]\n");

    let mut ctx = small_context();
    ctx.summary.average_horizon = 2;
    let result = summarize_folder(&ctx, dir.path(), dir.path()).unwrap();
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.error_count(), 2);
    assert!(result.errors[0].0.ends_with("b_bad.sol"));
    assert!(result.errors[1].0.ends_with("c_single.sol"));

    assert!(dir.path().join("a_good.par").exists());
    assert!(!dir.path().join("b_bad.par").exists());
    assert!(!dir.path().join("c_single.par").exists());
    assert!(!dir.path().join("c_single-fullCDF.gph").exists());
}

#[test]
fn summarize_missing_folder_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = summarize_folder(&StageContext::default(), &dir.path().join("nope"), dir.path())
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Dataset(DatasetError::FileNotFound { .. })
    ));
}
