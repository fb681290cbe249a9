use crate::common::timestamp_utils;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Value of a required argument; clap enforces presence, this only turns the
/// lookup into an error instead of a panic.
pub fn required_arg<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a String> {
    args.get_one::<String>(id)
        .with_context(|| format!("Missing required argument '{}'", id))
}

pub fn required_path(args: &ArgMatches, id: &str) -> Result<PathBuf> {
    required_arg(args, id).map(PathBuf::from)
}

pub fn arg_values<'a>(args: &'a ArgMatches, id: &str) -> Vec<&'a String> {
    args.get_many::<String>(id).map(|v| v.collect()).unwrap_or_default()
}

/// Base name of `input` when it is a path, `input` itself otherwise.
pub fn file_name_of(input: &str) -> String {
    Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string())
}

/// Output path with every `{date}` replaced by today's `YYYY-MM-DD` stamp.
pub fn expand_output_path(template: &str) -> PathBuf {
    PathBuf::from(template.replace("{date}", &timestamp_utils::today_stamp()))
}

/// Runs `op`, logging how long it took under `operation_display_name`.
pub fn run_timed<T, F>(operation_display_name: &str, op: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let start_time = Instant::now();
    debug!("🛠️ Starting '{}'...", operation_display_name);
    let result = op();
    if result.is_ok() {
        info!("🏁 '{}' finished in {:?}.", operation_display_name, start_time.elapsed());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_reduced_to_file_names() {
        assert_eq!(file_name_of("/corpus/CWE121/CWE121_Stack__char_01.c"), "CWE121_Stack__char_01.c");
        assert_eq!(file_name_of("CWE121_Stack__char_01.c"), "CWE121_Stack__char_01.c");
    }

    #[test]
    fn date_placeholder_is_expanded() {
        let expanded = expand_output_path("results_{date}.csv");
        let name = expanded.to_string_lossy();
        assert!(name.starts_with("results_"));
        assert!(!name.contains("{date}"));
        assert_eq!(name.len(), "results_YYYY-MM-DD.csv".len());
        assert_eq!(expand_output_path("plain.csv"), PathBuf::from("plain.csv"));
    }

    #[test]
    fn timed_op_passes_errors_through() {
        let result: Result<()> = run_timed("failing", || anyhow::bail!("nope"));
        assert_eq!(result.unwrap_err().to_string(), "nope");
        assert_eq!(run_timed("ok", || Ok(7)).unwrap(), 7);
    }
}
