//! Integration tests for command mode (-c/--command flag) and file handling

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        // Tests must be deterministic and not depend on a user's ~/.config/tabula/config.toml.
        .arg("--no-config")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tabula_cli_{}_{}", std::process::id(), name))
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "5 + 3 * 2"]);
    assert_eq!(stdout.trim(), "11");
    assert_eq!(code, 0);
}

#[test]
fn test_auto_prepend_equals() {
    let (stdout1, _, _) = run_command(&["-c", "10 + 5"]);
    let (stdout2, _, _) = run_command(&["-c", "=10 + 5"]);
    assert_eq!(stdout1, stdout2);
}

#[test]
fn test_division_by_zero() {
    let (stdout, _, code) = run_command(&["-c", "1/0"]);
    assert_eq!(stdout.trim(), "#ERROR");
    assert_eq!(code, 1);
}

#[test]
fn test_error_exit_code() {
    let (stdout, _, code) = run_command(&["-c", "undefined_function()"]);
    assert_eq!(stdout.trim(), "#ERROR");
    assert_eq!(code, 1);
}

#[test]
fn test_set_cells_then_evaluate() {
    let (stdout, _, code) = run_command(&[
        "-s", "A1=2", "-s", "A2=foo", "-s", "A3=4", "-c", "AVERAGE(A1:A3)",
    ]);
    assert_eq!(stdout.trim(), "3");
    assert_eq!(code, 0);
}

#[test]
fn test_formula_reference_is_not_evaluated() {
    let (stdout, _, code) = run_command(&["-s", "A1=7", "-s", "A2==A1", "-c", "A1+A2"]);
    assert_eq!(stdout.trim(), "7");
    assert_eq!(code, 0);
}

#[test]
fn test_open_sheet_file() {
    let sheet = temp_file("open.tab");
    fs::write(&sheet, "# budget\nA1: 100\nA2: 250\nA3: =SUM(A1:A2)\n").unwrap();

    let (stdout, _, code) = run_command(&[sheet.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("A1: 100 => 100"));
    assert!(stdout.contains("A3: =SUM(A1:A2) => 350"));

    fs::remove_file(sheet).ok();
}

#[test]
fn test_csv_output() {
    let output_file = temp_file("out.csv");

    let (_, stderr, code) = run_command(&[
        "-s",
        "A1=2",
        "-s",
        "B1==A1*21",
        "-o",
        output_file.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Exported to"));

    let content = fs::read_to_string(&output_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 15);
    assert!(lines[0].starts_with("\"2\",\"42\",\"\""));
    assert_eq!(lines[1].split(',').count(), 10);

    fs::remove_file(output_file).ok();
}

#[test]
fn test_write_back() {
    let sheet = temp_file("write.tab");
    fs::remove_file(&sheet).ok();

    let (_, _, code) = run_command(&[sheet.to_str().unwrap(), "-s", "C3=hello", "-w"]);
    assert_eq!(code, 0);
    let content = fs::read_to_string(&sheet).unwrap();
    assert!(content.contains("C3: hello"));

    fs::remove_file(sheet).ok();
}

#[test]
fn test_analysis_prompt() {
    let (stdout, _, code) = run_command(&["-s", "B1=x", "-s", "A1=10", "--analysis-prompt"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("A1: 10, B1: x"));
}

#[test]
fn test_analysis_prompt_empty_sheet() {
    let (_, stderr, code) = run_command(&["--analysis-prompt"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Please enter some data in the spreadsheet first"));
}

#[test]
fn test_out_of_bounds_set() {
    let (_, stderr, code) = run_command(&["-s", "K1=1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("outside"));
}

#[test]
fn test_config_changes_bounds() {
    let config = temp_file("config.toml");
    fs::write(&config, "[sheet]\nrows = 2\ncols = 20\n").unwrap();

    let output = Command::new("cargo")
        .args(["run", "-q", "--", "--config"])
        .arg(&config)
        .args(["-s", "K1=1", "-c", "K1*3"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");
    assert_eq!(output.status.code(), Some(0));

    fs::remove_file(config).ok();
}

#[test]
fn test_help_lists_range_functions() {
    let (_, stderr, code) = run_command(&["--help"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("SUM(A1:B2)"));
    assert!(stderr.contains("AVERAGE(A1:B2)"));
}
