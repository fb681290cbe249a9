// Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Writes `count` flow variants (`_01.c`, `_02.c`, ...) of one functional
/// variant into `dir` and returns their paths.
pub fn write_variant(dir: &Path, cwe: &str, variant: &str, count: usize) -> Vec<PathBuf> {
    (1..=count)
        .map(|flow| {
            let path = dir.join(format!("{}__{}_{:02}.c", cwe, variant, flow));
            fs::write(&path, format!("/* TEMPLATE GENERATED TESTCASE FILE\n{} {}\n", variant, flow)).unwrap();
            path
        })
        .collect()
}

/// Runs the tcman binary with an explicit config so the repo default is not
/// picked up.
pub fn tcman(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tcman"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run tcman")
}

pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("tcman.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

pub fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
