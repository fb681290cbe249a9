use super::op_helper::{required_arg, required_path};
use crate::common::file_utils;
use crate::config_loader::MasterConfig;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

pub fn handle_find_files_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let start_time = Instant::now();
    let dir = required_path(args, "dir")?;
    let regex = required_arg(args, "regex")?;
    let files = file_utils::find_files_in_dir(&dir, regex, !args.get_flag("verbose"))
        .with_context(|| format!("Failed to search '{}' for files matching '{}'", dir.display(), regex))?;
    print_paths(&files);
    info!("🔎 {} file(s) matched '{}' under '{}' in {:?}", files.len(), regex, dir.display(), start_time.elapsed());
    Ok(())
}

pub fn handle_find_dirs_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let start_time = Instant::now();
    let dir = required_path(args, "dir")?;
    let regex = required_arg(args, "regex")?;
    let dirs = file_utils::find_directories_in_dir(&dir, regex, !args.get_flag("verbose"))
        .with_context(|| format!("Failed to search '{}' for directories matching '{}'", dir.display(), regex))?;
    print_paths(&dirs);
    info!("🔎 {} directory(ies) matched '{}' under '{}' in {:?}", dirs.len(), regex, dir.display(), start_time.elapsed());
    Ok(())
}

pub fn handle_clean_dir_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let dir = required_path(args, "dir")?;
    file_utils::create_or_clean_directory(&dir)
        .with_context(|| format!("Failed to create or clean '{}'", dir.display()))?;
    info!("📁 '{}' is ready and empty.", dir.display());
    Ok(())
}
