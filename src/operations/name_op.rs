use crate::config_loader::MasterConfig;
use crate::core::filename_parser::{
    extract_cwe_id_from_path, parse_primary_testcase_filename, parse_testcase_filename,
    simplify_function_name, TestCaseFileName,
};
use super::op_helper::{arg_values, file_name_of};
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{debug, info, warn};
use std::path::Path;

/// One line per name: the name followed by `column=value` pairs.
pub fn describe(name: &str, parsed: &TestCaseFileName) -> String {
    let fields: Vec<String> = parsed
        .columns()
        .iter()
        .map(|(column, value)| format!("{}={}", column, value))
        .collect();
    format!("{}\t{}", name, fields.join("\t"))
}

pub fn handle_parse_name_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let primary_only = args.get_flag("primary");
    let mut unparsed = 0usize;

    for input in arg_values(args, "names") {
        let name = file_name_of(input);
        let parsed = if primary_only {
            match parse_primary_testcase_filename(&name) {
                Some(parsed) => parsed,
                None => {
                    debug!("'{}' is not a primary test case file", name);
                    unparsed += 1;
                    continue;
                }
            }
        } else {
            parse_testcase_filename(&name)
        };
        if parsed.is_empty() {
            unparsed += 1;
        }
        println!("{}", describe(&name, &parsed));
    }

    if unparsed > 0 {
        warn!("⚠️ {} name(s) did not match the test case grammar.", unparsed);
    }
    Ok(())
}

pub fn handle_simplify_function_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    for name in arg_values(args, "names") {
        println!("{}\t{}", name, simplify_function_name(name));
    }
    Ok(())
}

pub fn handle_cwe_id_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let paths = arg_values(args, "paths");
    info!("🔎 Extracting CWE ids from {} path(s)", paths.len());
    for path in paths {
        let cwe_id = extract_cwe_id_from_path(Path::new(path))
            .with_context(|| format!("Failed to extract the CWE id from '{}'", path))?;
        println!("{}\t{}", path, cwe_id);
    }
    Ok(())
}
