use crate::common::file_utils;
use crate::core::filename_parser::{is_baseline_functional_variant_filename, TestCaseFileName};
use crate::core::patterns::BASELINE_FUNCTIONAL_VARIANT;
use crate::errors::AppError;
use log::{debug, info, warn};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The files of one functional variant and the split directory they go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalVariantBucket {
    pub functional_variant: String,
    pub files: Vec<PathBuf>,
    pub subdirectory: String,
    /// Set on the bucket that creates `subdirectory`.
    pub opens_subdirectory: bool,
}

// Running state while variants are assigned in order
#[derive(Debug)]
struct SubdirectoryAssignment {
    next_index: usize,
    files_in_current: usize,
    new_subdirectory_needed: bool,
    current: String,
}

impl SubdirectoryAssignment {
    fn new() -> Self {
        SubdirectoryAssignment {
            next_index: 1,
            files_in_current: 0,
            new_subdirectory_needed: true,
            current: String::new(),
        }
    }

    /// Picks the subdirectory for a variant of `file_count` files. Returns
    /// whether a new subdirectory was opened for it.
    fn place(&mut self, file_count: usize, file_count_limit: usize) -> bool {
        if file_count + self.files_in_current > file_count_limit {
            self.new_subdirectory_needed = true;
        }

        if self.new_subdirectory_needed {
            self.current = subdirectory_name(self.next_index);
            self.next_index += 1;
            self.new_subdirectory_needed = false;
            self.files_in_current = file_count;
            true
        } else {
            self.files_in_current += file_count;
            false
        }
    }
}

/// `s01`..`s09`, then `s10`, `s11`, ...
pub fn subdirectory_name(index: usize) -> String {
    format!("s{:02}", index)
}

/// Matches file names of one functional variant: `__<variant>_NN`.
pub fn functional_variant_filter(functional_variant: &str) -> Result<Regex, AppError> {
    let pattern = format!(r"__{}_\d\d", regex::escape(functional_variant));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::Regex { pattern, details: e.to_string() })
}

/// Assigns every functional variant, in the given order, to a split
/// subdirectory without touching the filesystem.
///
/// A variant's files always share one subdirectory. A new subdirectory is
/// opened when the variant would push the current one past
/// `file_count_limit`; a variant that is bigger than the limit on its own
/// still lands whole in a single subdirectory.
pub fn plan_buckets(
    functional_variants: &[String],
    all_files: &[PathBuf],
    file_count_limit: usize,
) -> Result<Vec<FunctionalVariantBucket>, AppError> {
    let mut assignment = SubdirectoryAssignment::new();
    let mut claimed: HashSet<&Path> = HashSet::new();
    let mut buckets = Vec::with_capacity(functional_variants.len());

    for functional_variant in functional_variants {
        let filter = functional_variant_filter(functional_variant)?;
        let mut files = Vec::new();
        for file in all_files {
            let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            if !filter.is_match(&name) {
                continue;
            }
            if claimed.insert(file.as_path()) {
                files.push(file.clone());
            } else {
                warn!("File '{}' also matches functional variant \"{}\"; keeping its first assignment", file.display(), functional_variant);
            }
        }

        let opens_subdirectory = assignment.place(files.len(), file_count_limit);
        debug!(
            "Functional variant \"{}\": {} file(s) -> {} ({} file(s) in subdirectory)",
            functional_variant, files.len(), assignment.current, assignment.files_in_current
        );
        buckets.push(FunctionalVariantBucket {
            functional_variant: functional_variant.clone(),
            files,
            subdirectory: assignment.current.clone(),
            opens_subdirectory,
        });
    }

    Ok(buckets)
}

fn move_file_into(file: &Path, directory: &Path) -> Result<(), AppError> {
    let file_name = file
        .file_name()
        .ok_or_else(|| AppError::Io(format!("'{}' has no file name", file.display())))?;
    let target = directory.join(file_name);
    fs::copy(file, &target).map_err(|e| {
        AppError::Io(format!("Failed to copy '{}' to '{}': {}", file.display(), target.display(), e))
    })?;
    fs::remove_file(file)
        .map_err(|e| AppError::Io(format!("Failed to remove '{}': {}", file.display(), e)))
}

/// Splits a flat test case directory into `sNN` subdirectories of `root_dir`,
/// keeping every functional variant together. See [`plan_buckets`] for the
/// placement rule.
///
/// Each subdirectory must not exist yet. Failures stop the run where they
/// happen; files already moved stay moved.
pub fn bucket_by_functional_variant(
    root_dir: &Path,
    functional_variants: &[String],
    all_files: &[PathBuf],
    file_count_limit: usize,
) -> Result<Vec<FunctionalVariantBucket>, AppError> {
    let start_time = Instant::now();
    let buckets = plan_buckets(functional_variants, all_files, file_count_limit)?;

    for bucket in &buckets {
        let subdirectory = root_dir.join(&bucket.subdirectory);
        if bucket.opens_subdirectory {
            fs::create_dir(&subdirectory).map_err(|e| {
                AppError::Io(format!("Failed to create subdirectory '{}': {}", subdirectory.display(), e))
            })?;
        }

        info!(
            "Moving the test cases for the following functional variant \"{}\" to subdirectory \"{}\"",
            bucket.functional_variant,
            subdirectory.display()
        );
        for file in &bucket.files {
            move_file_into(file, &subdirectory)?;
        }
    }

    info!(
        "📦 Split {} functional variant(s) under '{}' in {:?}",
        buckets.len(),
        root_dir.display(),
        start_time.elapsed()
    );
    Ok(buckets)
}

/// Lists the functional variants present under `dir`, one per baseline
/// (flow variant 01) file, in discovery order without repeats.
pub fn find_testcase_functional_variants_in_dir(dir: &Path) -> Result<Vec<String>, AppError> {
    let baseline_files = file_utils::find_files_in_dir(dir, BASELINE_FUNCTIONAL_VARIANT, true)?;

    let mut seen = HashSet::new();
    let mut functional_variants = Vec::new();
    for file in baseline_files {
        let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        if !is_baseline_functional_variant_filename(&name) {
            continue;
        }
        let parsed = TestCaseFileName::parse(&name).ok_or_else(|| {
            AppError::Parse(format!("Could not determine the functional variant in {}", name))
        })?;
        if seen.insert(parsed.functional_variant_name.clone()) {
            functional_variants.push(parsed.functional_variant_name);
        }
    }
    Ok(functional_variants)
}
