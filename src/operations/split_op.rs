use super::op_helper::required_path;
use crate::common::file_utils;
use crate::config_loader::MasterConfig;
use crate::core::corpus_bucketer::{
    bucket_by_functional_variant, find_testcase_functional_variants_in_dir, plan_buckets,
    FunctionalVariantBucket,
};
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use log::{info, warn};
use std::time::Instant;

pub fn handle_list_variants_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let dir = required_path(args, "dir")?;
    let functional_variants = find_testcase_functional_variants_in_dir(&dir)
        .with_context(|| format!("Failed to list functional variants in '{}'", dir.display()))?;
    for functional_variant in &functional_variants {
        println!("{}", functional_variant);
    }
    info!("🧬 {} functional variant(s) in '{}'", functional_variants.len(), dir.display());
    Ok(())
}

fn print_layout(buckets: &[FunctionalVariantBucket]) {
    for bucket in buckets {
        println!("{}\t{}\t{}", bucket.subdirectory, bucket.functional_variant, bucket.files.len());
    }
}

pub fn handle_split_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let start_time = Instant::now();
    let dir = required_path(args, "dir")?;
    let file_count_limit = args
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(master_config.app_settings.split_file_count_limit);
    if file_count_limit == 0 {
        bail!("❌ The file count limit must be greater than zero.");
    }

    let functional_variants = find_testcase_functional_variants_in_dir(&dir)
        .with_context(|| format!("Failed to list functional variants in '{}'", dir.display()))?;
    if functional_variants.is_empty() {
        warn!("⚠️ No baseline test case files found in '{}'. Nothing to split.", dir.display());
        return Ok(());
    }

    let testcase_files = file_utils::find_all_files_in_dir_nr(&dir)
        .with_context(|| format!("Failed to list test case files in '{}'", dir.display()))?;
    info!(
        "🎯 Splitting {} file(s) of {} functional variant(s) in '{}' with a limit of {} file(s) per subdirectory.",
        testcase_files.len(), functional_variants.len(), dir.display(), file_count_limit
    );

    let buckets = if args.get_flag("dry-run") {
        plan_buckets(&functional_variants, &testcase_files, file_count_limit)
            .context("Failed to plan the split")?
    } else {
        bucket_by_functional_variant(&dir, &functional_variants, &testcase_files, file_count_limit)
            .with_context(|| format!("Failed to split '{}'", dir.display()))?
    };
    print_layout(&buckets);

    let placed: usize = buckets.iter().map(|b| b.files.len()).sum();
    if placed < testcase_files.len() {
        warn!(
            "⚠️ {} file(s) in '{}' belong to no functional variant and were left in place.",
            testcase_files.len() - placed, dir.display()
        );
    }
    info!("✅ Split of '{}' done in {:?}.", dir.display(), start_time.elapsed());
    Ok(())
}
