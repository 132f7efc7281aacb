//! Black-box CLI tests driving the built `gobc` binary (spec §4.6, §6).

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn gobc() -> Command {
    Command::cargo_bin("gobc").unwrap()
}

#[test]
fn version_flag_prints_version_and_exits_zero() {
    gobc()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Gob v"));
}

#[test]
fn no_input_files_is_a_config_error() {
    gobc()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input files given"));
}

#[test]
fn missing_input_file_forces_nonzero_exit() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.b");

    gobc().arg(&missing).assert().failure();
}

#[test]
fn clean_program_compiles_and_writes_default_output_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hello.b");
    fs::write(&input, "main() { auto x; x = 1; return x; }").unwrap();

    gobc().arg(&input).assert().success();

    let output = dir.path().join("hello.c");
    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("#include \"bstdlib.h\""));
    assert!(generated.contains("static B_AUTO main()"));
}

#[test]
fn custom_output_path_is_honored() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hello.b");
    let output = dir.path().join("out.c");
    fs::write(&input, "main() { return 0; }").unwrap();

    gobc()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists());
}

#[test]
fn parse_only_emits_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hello.b");
    fs::write(&input, "main() { return 0; }").unwrap();

    gobc().arg(&input).arg("-p").assert().success();

    assert!(!dir.path().join("hello.c").exists());
}

#[test]
fn parse_error_is_reported_but_exit_stays_zero() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.b");
    fs::write(&input, "main( { return 0; }").unwrap();

    gobc()
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn semantic_error_is_reported_but_file_still_emits() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dup.b");
    fs::write(&input, "f() { return 0; } f() { return 1; }").unwrap();

    gobc()
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Semantic error"));

    assert!(dir.path().join("dup.c").exists());
}

#[test]
fn output_flag_rejected_with_multiple_inputs() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.b");
    let b = dir.path().join("b.b");
    fs::write(&a, "main() { return 0; }").unwrap();
    fs::write(&b, "g() { return 0; }").unwrap();

    gobc()
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(dir.path().join("out.c"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than one input file"));
}
