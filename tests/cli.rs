//! Binary-level checks for the exits that happen before a window opens.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn pairplot() -> Result<Command, Box<dyn std::error::Error>> {
    Ok(Command::cargo_bin("pairplot")?)
}

#[test]
fn no_arguments_is_a_usage_failure() -> TestResult {
    pairplot()?
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("<PATH>"));
    Ok(())
}

#[test]
fn nonexistent_file_prints_error_and_exits_one() -> TestResult {
    let dir = TempDir::new()?;
    let missing = dir.path().join("missing.csv");

    pairplot()?
        .arg(&missing)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing.csv"));
    Ok(())
}

#[test]
fn malformed_csv_exits_one() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("ragged.csv");
    fs::write(&path, "n1,n2,jac\nA,B,0.5,extra\n")?;

    pairplot()?.arg(&path).assert().code(1);
    Ok(())
}

#[test]
fn missing_jac_column_fails_without_printing_a_table() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("no_jac.csv");
    fs::write(&path, "n1,n2,score\nA,B,0.5\n")?;

    pairplot()?
        .arg(&path)
        .assert()
        .failure()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'jac'"));
    Ok(())
}

#[test]
fn non_numeric_score_fails() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("words.csv");
    fs::write(&path, "n1,n2,jac\nA,B,high\n")?;

    pairplot()?
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not numeric"));
    Ok(())
}

#[test]
fn too_many_fields_reports_the_line() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("long.csv");
    fs::write(&path, "n1,n2,jac\nA,B,0.5\nC,D,0.1,extra\n")?;

    pairplot()?
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Expected 3 fields in line 3, saw 4"));
    Ok(())
}
