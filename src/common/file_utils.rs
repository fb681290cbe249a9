use crate::core::patterns;
use crate::errors::AppError;
use log::{debug, info, warn};
use regex::{Regex, RegexBuilder};
use std::fs;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Compiles a caller-supplied pattern for case-insensitive name matching.
pub fn case_insensitive_regex(pattern: &str) -> Result<Regex, AppError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::Regex {
            pattern: pattern.to_string(),
            details: e.to_string(),
        })
}

#[derive(Clone, Copy, PartialEq)]
enum EntryKind {
    File,
    Directory,
}

fn find_entries_in_dir(
    directory: &Path,
    regex: &str,
    silent: bool,
    kind: EntryKind,
) -> Result<Vec<PathBuf>, AppError> {
    let matcher = case_insensitive_regex(regex)?;
    let mut matches = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under '{}': {}", directory.display(), e);
                continue;
            }
        };
        let is_dir = entry.path().is_dir();
        if is_dir != (kind == EntryKind::Directory) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if matcher.is_match(&name) {
            matches.push(resolved_path(entry.path())?);
        } else if !silent {
            match kind {
                EntryKind::File => info!("Skipped file (did not match regex): {}", name),
                EntryKind::Directory => info!("Skipped dir (did not match regex): {}", name),
            }
        }
    }

    debug!("Found {} entries matching '{}' under '{}'", matches.len(), regex, directory.display());
    Ok(matches)
}

/// Canonical form of `path`, or its absolute form when it cannot be resolved
/// (dangling symlinks, loops).
fn resolved_path(path: &Path) -> Result<PathBuf, AppError> {
    match fs::canonicalize(path) {
        Ok(canonical) => Ok(canonical),
        Err(e) => {
            debug!("Could not canonicalize '{}': {}", path.display(), e);
            Ok(std::path::absolute(path)?)
        }
    }
}

/// Finds files under `directory` (recursively) whose name matches `regex`,
/// case-insensitive. Returns canonical paths.
pub fn find_files_in_dir(directory: &Path, regex: &str, silent: bool) -> Result<Vec<PathBuf>, AppError> {
    find_entries_in_dir(directory, regex, silent, EntryKind::File)
}

/// Same as [`find_files_in_dir`] but for directories.
pub fn find_directories_in_dir(directory: &Path, regex: &str, silent: bool) -> Result<Vec<PathBuf>, AppError> {
    find_entries_in_dir(directory, regex, silent, EntryKind::Directory)
}

/// Lists the regular files directly inside `directory` (not recursive).
pub fn find_all_files_in_dir_nr(directory: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// True when the first line of the file is the template engine signature.
pub fn is_generated_file(path: &Path) -> Result<bool, AppError> {
    let file = fs::File::open(path)
        .map_err(|e| AppError::Io(format!("Failed to open '{}': {}", path.display(), e)))?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line)?;
    Ok(first_line.trim() == patterns::ENGINE_SIGNATURE)
}

/// Reads a whole file. Content that is not valid UTF-8 is reported and
/// yields `None`.
pub fn read_file_contents(path: &Path) -> Result<Option<String>, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            warn!("Weird char in {}: {}", path.display(), e);
            Ok(None)
        }
        Err(e) => Err(AppError::Io(format!("Failed to read '{}': {}", path.display(), e))),
    }
}

/// Reads a file as lines, keeping line terminators like the contents they
/// came from.
pub fn read_file_lines(path: &Path) -> Result<Option<Vec<String>>, AppError> {
    Ok(read_file_contents(path)?
        .map(|content| content.split_inclusive('\n').map(str::to_string).collect()))
}

pub fn write_file(path: &Path, contents: &str) -> Result<(), AppError> {
    fs::write(path, contents)
        .map_err(|e| AppError::Io(format!("Failed to write '{}': {}", path.display(), e)))
}

/// Creates `dir`, or empties it when it already exists.
pub fn create_or_clean_directory(dir: &Path) -> Result<(), AppError> {
    if !dir.exists() {
        info!("The path \"{}\" does not exist", dir.display());
        info!("creating directory \"{}\"", dir.display());
    } else {
        info!("{} already exists. Cleaning before use...", dir.display());
        fs::remove_dir_all(dir).map_err(|e| {
            AppError::Io(format!("Failed to clean directory '{}': {}", dir.display(), e))
        })?;
    }
    fs::create_dir_all(dir).map_err(|e| {
        AppError::Io(format!("Failed to create directory '{}': {}", dir.display(), e))
    })
}
