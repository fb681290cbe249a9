use crate::common::file_utils;
use crate::errors::AppError;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub type Record = Vec<String>;

pub const FINDING_ID_COLUMN: &str = "finding_id";

fn open_reader(path: &Path) -> Result<csv::Reader<fs::File>, AppError> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::Csv(format!("Failed to open '{}': {}", path.display(), e)))
}

// Excel dialect: comma separated, minimal quoting, CRLF line endings
fn open_writer(path: &Path) -> Result<csv::Writer<fs::File>, AppError> {
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_path(path)
        .map_err(|e| AppError::Csv(format!("Failed to create '{}': {}", path.display(), e)))
}

fn to_record(row: &csv::StringRecord) -> Record {
    row.iter().map(str::to_string).collect()
}

/// Position of `column` in `header`, or a `MissingColumn` error naming `origin`.
pub fn column_index(header: &[String], column: &str, origin: &str) -> Result<usize, AppError> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| AppError::MissingColumn {
            column: column.to_string(),
            origin: origin.to_string(),
        })
}

pub fn read_csv(path: &Path) -> Result<Vec<Record>, AppError> {
    let mut reader = open_reader(path)?;
    let mut records = Vec::new();
    for row in reader.records() {
        records.push(to_record(&row?));
    }
    Ok(records)
}

/// Reads a CSV and splits off its first row as the header.
pub fn read_csv_with_header(path: &Path) -> Result<(Record, Vec<Record>), AppError> {
    let mut records = read_csv(path)?;
    if records.is_empty() {
        return Err(AppError::Csv(format!("'{}' has no header row", path.display())));
    }
    let header = records.remove(0);
    Ok((header, records))
}

pub fn write_csv(path: &Path, records: &[Record]) -> Result<(), AppError> {
    let mut writer = open_writer(path)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Streams `input` to `output`, letting the caller rewrite the header once
/// and then every row.
///
/// `header_fx` receives the original header and returns the new header along
/// with arbitrary data that is handed to each `row_fx` call as
/// `row_fx(orig_header, new_header, row, &mut data)`.
pub fn transform_csv<D, H, R>(
    input: &Path,
    output: &Path,
    header_fx: H,
    mut row_fx: R,
) -> Result<PathBuf, AppError>
where
    H: FnOnce(&[String]) -> Result<(Record, D), AppError>,
    R: FnMut(&[String], &[String], Record, &mut D) -> Result<Record, AppError>,
{
    let mut reader = open_reader(input)?;
    let mut rows = reader.records();
    let orig_header = match rows.next() {
        Some(row) => to_record(&row?),
        None => return Err(AppError::Csv(format!("'{}' has no header row", input.display()))),
    };

    let (new_header, mut data) = header_fx(&orig_header)?;

    let mut writer = open_writer(output)?;
    writer.write_record(&new_header)?;

    let mut row_count = 0usize;
    for row in rows {
        let row = row_fx(&orig_header, &new_header, to_record(&row?), &mut data)?;
        writer.write_record(&row)?;
        row_count += 1;
    }
    writer.flush()?;

    debug!("Transformed {} rows from '{}' into '{}'", row_count, input.display(), output.display());
    Ok(output.to_path_buf())
}

/// Header callback for [`transform_csv`] that keeps the header unchanged.
pub fn keep_header(header: &[String]) -> Result<(Record, ()), AppError> {
    Ok((header.to_vec(), ()))
}

/// Combines every `*.csv` under `input_directory` into `output_file`. The
/// header is taken from the first file; every file's records are appended.
pub fn concatenate_csvs(input_directory: &Path, output_file: &Path) -> Result<usize, AppError> {
    let inputs = file_utils::find_files_in_dir(input_directory, r".*?\.csv$", true)?;
    // The output may live inside the input directory from an earlier run
    let output_canonical = fs::canonicalize(output_file).ok();

    let mut writer = open_writer(output_file)?;
    let mut need_header = true;
    let mut combined = 0usize;

    for file in inputs {
        if output_canonical.as_deref() == Some(file.as_path()) {
            debug!("Skipping output file '{}' while concatenating", file.display());
            continue;
        }
        let (header, records) = read_csv_with_header(&file)?;
        if need_header {
            writer.write_record(&header)?;
            need_header = false;
        }
        for record in &records {
            writer.write_record(record)?;
        }
        combined += 1;
    }
    writer.flush()?;

    info!("Concatenated {} CSV file(s) from '{}' into '{}'", combined, input_directory.display(), output_file.display());
    Ok(combined)
}

/// Sequential id source for the `finding_id` column. Starts at 1 and keeps
/// counting across every row it is given, including rows from other files.
#[derive(Debug)]
pub struct UniqueIdCounter {
    next_id: u64,
}

impl Default for UniqueIdCounter {
    fn default() -> Self {
        UniqueIdCounter { next_id: 1 }
    }
}

impl UniqueIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Row callback: overwrites the `finding_id` cell with the next id.
    pub fn assign(&mut self, orig_header: &[String], mut row: Record) -> Result<Record, AppError> {
        let index = column_index(orig_header, FINDING_ID_COLUMN, "row header")?;
        if row.len() <= index {
            row.resize(index + 1, String::new());
        }
        row[index] = self.next_id.to_string();
        self.next_id += 1;
        Ok(row)
    }
}

/// Rewrites `finding_id` in `input_csv` so every row gets a unique number,
/// starting from 1 for this file.
pub fn generate_unique_finding_ids(input_csv: &Path, output_csv: &Path) -> Result<u64, AppError> {
    let origin = input_csv.display().to_string();
    let mut counter = UniqueIdCounter::new();
    transform_csv(
        input_csv,
        output_csv,
        |header| {
            column_index(header, FINDING_ID_COLUMN, &origin)?;
            keep_header(header)
        },
        |orig_header, _new_header, row, _| counter.assign(orig_header, row),
    )?;
    Ok(counter.next_id() - 1)
}
