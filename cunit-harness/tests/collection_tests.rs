//! End-to-end collection tests.
//!
//! Each test writes a source file and a shell script standing in for its
//! compiled test executable into a temporary directory.

#![cfg(unix)]
#![allow(clippy::panic_in_result_fn)]

use anyhow::Result;
use assert_fs::prelude::*;
use cunit_harness::{
    CollectError, Discoverer, ItemOutcome, ParseError, RunnerConfig, TestOptions, TestRunner,
};
use std::os::unix::fs::PermissionsExt;

fn add_test_executable(dir: &impl PathChild, name: &str, script: &str) -> Result<()> {
    dir.child(format!("{name}.c")).write_str("/* test source */\n")?;

    let exe = dir.child(name);
    exe.write_str(&format!("#!/bin/sh\n{script}"))?;

    let mut perms = exe.path().metadata()?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(exe.path(), perms)?;

    Ok(())
}

#[test]
fn single_passing_result() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    add_test_executable(&dir, "test_ok", "echo '[PASS] ok:1'\n")?;

    let file = Discoverer::default()
        .consider(&dir.path().join("test_ok.c"))
        .ok_or_else(|| anyhow::anyhow!("test_ok.c was not accepted"))?;

    let items: Vec<_> = file.collect()?.collect();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name(), "ok");
    assert_eq!(items[0].run(), Ok(()));

    Ok(())
}

#[test]
fn mixed_results_with_noise() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    add_test_executable(
        &dir,
        "test_math",
        r"echo 'Running suite...'
echo '[PASS] add:10'
echo '[FAIL] sub:20'
echo '[TST] checks subtraction'
echo '[INFO] build=debug'
echo '[EXP] 5'
echo '[GOT] 4'
echo 'done' >&2
",
    )?;

    let file = Discoverer::default()
        .consider(&dir.path().join("test_math.c"))
        .ok_or_else(|| anyhow::anyhow!("test_math.c was not accepted"))?;

    let items: Vec<_> = file.collect()?.collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name(), "add");
    assert!(items[0].run().is_ok());

    let failure = items[1]
        .run()
        .err()
        .ok_or_else(|| anyhow::anyhow!("sub should fail"))?;
    let report = items[1].repr_failure(&failure);
    assert!(report.contains("sub"));
    assert!(report.contains("got: 4"));
    assert!(report.contains("expected: 5"));
    assert_eq!(items[1].report_info().line, 19);

    Ok(())
}

#[test]
fn nonzero_exit_fails_collection() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    add_test_executable(&dir, "test_crash", "echo '[PASS] ok:1'\necho boom >&2\nexit 1\n")?;

    let file = Discoverer::default()
        .consider(&dir.path().join("test_crash.c"))
        .ok_or_else(|| anyhow::anyhow!("test_crash.c was not accepted"))?;

    match file.collect() {
        Err(CollectError::ExitStatus { status, stderr, .. }) => {
            assert_eq!(status.code(), Some(1));
            assert_eq!(stderr, "boom\n");
        }
        Err(e) => anyhow::bail!("unexpected error: {e}"),
        Ok(items) => anyhow::bail!("expected failure, got {} item(s)", items.count()),
    }

    Ok(())
}

#[test]
fn missing_executable_fails_collection() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("test_missing.c").write_str("")?;

    let file = Discoverer::default()
        .consider(&dir.path().join("test_missing.c"))
        .ok_or_else(|| anyhow::anyhow!("test_missing.c was not accepted"))?;

    assert!(matches!(file.collect(), Err(CollectError::Spawn { .. })));

    Ok(())
}

#[test]
fn malformed_output_fails_collection() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    add_test_executable(&dir, "test_bad", "echo '[EXP] 1'\necho '[PASS] a:1'\n")?;

    let file = Discoverer::default()
        .consider(&dir.path().join("test_bad.c"))
        .ok_or_else(|| anyhow::anyhow!("test_bad.c was not accepted"))?;

    assert!(matches!(
        file.collect(),
        Err(CollectError::Parse {
            source: ParseError::OrphanDetail { line: 1, .. },
            ..
        })
    ));

    Ok(())
}

#[test]
fn each_collect_runs_the_executable_again() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    add_test_executable(
        &dir,
        "test_count",
        "echo run >> spawns.log\necho '[PASS] counted:4'\n",
    )?;

    let file = Discoverer::default()
        .consider(&dir.path().join("test_count.c"))
        .ok_or_else(|| anyhow::anyhow!("test_count.c was not accepted"))?;

    assert_eq!(file.collect()?.count(), 1);
    assert_eq!(file.collect()?.count(), 1);

    let log = std::fs::read_to_string(dir.path().join("spawns.log"))?;
    assert_eq!(log.lines().count(), 2);

    Ok(())
}

#[test]
fn runner_walks_directories() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    add_test_executable(&dir, "test_a", "echo '[PASS] a1:1'\necho '[FAIL] a2:2'\n")?;
    let nested = dir.child("nested");
    nested.create_dir_all()?;
    add_test_executable(&nested, "test_b", "echo '[PASS] b1:5'\n")?;

    dir.child("helper.c").write_str("")?;
    dir.child("test_a.h").write_str("")?;

    let runner = TestRunner::new(
        RunnerConfig::new(vec![dir.path().to_path_buf()]),
        TestOptions::default(),
    );

    let files = runner.discover()?;
    assert_eq!(files.len(), 2);

    // Walk order is sorted by file name, descending into directories in place.
    let results = runner.collect_and_evaluate()?;
    assert_eq!(results.len(), 2);
    assert!(results[0].source_path.ends_with("nested/test_b.c"));
    assert_eq!(results[0].success_count, 1);
    assert_eq!(results[0].fail_count, 0);
    assert!(results[1].source_path.ends_with("test_a.c"));
    assert_eq!(results[1].success_count, 1);
    assert_eq!(results[1].fail_count, 1);
    assert!(results.iter().all(|r| r.collection_error.is_none()));

    assert!(!runner.run()?);

    Ok(())
}

#[test]
fn runner_filters_items() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    add_test_executable(&dir, "test_a", "echo '[PASS] keep:1'\necho '[FAIL] drop:2'\n")?;

    let options = TestOptions {
        exclude_filters: vec!["::drop".into()],
        ..TestOptions::default()
    };
    let runner = TestRunner::new(RunnerConfig::new(vec![dir.path().to_path_buf()]), options);

    let results = runner.collect_and_evaluate()?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].success_count, 1);
    assert_eq!(results[0].deselected_count, 1);
    assert_eq!(results[0].item_results[1].outcome, ItemOutcome::Deselected);

    assert!(runner.run()?);

    Ok(())
}

#[test]
fn runner_reports_collection_errors() -> Result<()> {
    let dir = assert_fs::TempDir::new()?;
    add_test_executable(&dir, "test_a", "echo '[PASS] a:1'\n")?;
    add_test_executable(&dir, "test_b", "exit 3\n")?;

    let runner = TestRunner::new(
        RunnerConfig::new(vec![dir.path().to_path_buf()]),
        TestOptions::default(),
    );

    let results = runner.collect_and_evaluate()?;
    assert_eq!(results.len(), 2);
    assert!(results[0].collection_error.is_none());
    assert!(results[1].collection_error.is_some());
    assert!(results[1].item_results.is_empty());

    assert!(!runner.run()?);

    Ok(())
}
