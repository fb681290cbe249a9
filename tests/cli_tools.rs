mod common;

use common::{tcman, write_config};
use std::fs;
use tempfile::tempdir;

#[test]
fn parse_name_prints_columns_and_tolerates_bad_names() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "");
    let output = tcman(
        &config,
        &["parse-name", "CWE476_NULL_Pointer_Dereference__int_81_bad.cpp", "io.c"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("testcase_flow_variant=81"));
    assert!(lines[0].contains("testcase_subfile_id=bad"));
    assert!(lines[1].starts_with("io.c\ttestcase_cwe_number=\t"));
}

#[test]
fn primary_filter_drops_81_bad() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "");
    let output = tcman(
        &config,
        &["parse-name", "--primary", "CWE476_NULL__int_81_bad.cpp", "CWE476_NULL__int_81a.cpp"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("CWE476_NULL__int_81a.cpp\t"));
}

#[test]
fn elapsed_formats_dhms() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "");
    let output = tcman(&config, &["elapsed", "90"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0 days, 0 hours, 1 minute, 30 seconds");
}

#[test]
fn cwe_id_failure_exits_non_zero() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "");
    let output = tcman(&config, &["cwe-id", "/suite/testcases/misc"]);
    assert!(!output.status.success());
}

#[test]
fn invalid_config_is_fatal() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "application:\n  split_file_count_limit: 0\n");
    let output = tcman(&config, &["elapsed", "1"]);
    assert!(!output.status.success());
}

#[test]
fn log_lines_carry_a_timestamp_prefix() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "application:\n  log_level: info\n");
    let output = tcman(&config, &["parse-name", "not_a_testcase.txt"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let warning = stderr
        .lines()
        .find(|l| l.contains("is not going to be parsed into parts"))
        .expect("warning line");
    assert!(warning.starts_with('['));
    assert!(!warning.contains("WARN "));
}

#[test]
fn concat_and_renumber_pipeline() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "");
    let inputs = tmp.path().join("results");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("tool_a.csv"), "finding_id,filename\r\n9,CWE121_Stack__char_01.c\r\n").unwrap();
    fs::write(inputs.join("tool_b.csv"), "finding_id,filename\r\n9,CWE78_OS__char_02.c\r\n").unwrap();

    let combined = tmp.path().join("combined.csv");
    let renumbered = tmp.path().join("renumbered.csv");
    let annotated = tmp.path().join("annotated.csv");

    assert!(tcman(&config, &["concat-csv", inputs.to_str().unwrap(), combined.to_str().unwrap()]).status.success());
    assert!(tcman(&config, &["unique-ids", combined.to_str().unwrap(), renumbered.to_str().unwrap()]).status.success());
    assert!(tcman(&config, &["annotate-csv", renumbered.to_str().unwrap(), annotated.to_str().unwrap()]).status.success());

    let text = fs::read_to_string(&annotated).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("finding_id,filename,testcase_cwe_number"));
    assert!(lines[1].starts_with("1,CWE121_Stack__char_01.c,121,Stack,char,01,,c"));
    assert!(lines[2].starts_with("2,CWE78_OS__char_02.c,78,OS,char,02,,c"));
}
