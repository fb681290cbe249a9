use super::op_helper::{arg_values, expand_output_path, file_name_of, required_arg, required_path};
use crate::common::csv_utils::{self, Record, UniqueIdCounter, FINDING_ID_COLUMN};
use crate::config_loader::MasterConfig;
use crate::core::filename_parser::{parse_testcase_filename, simplify_function_name, TestCaseFileName};
use crate::core::weakness_classes;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use log::info;
use std::path::Path;

pub const SIMPLIFIED_FUNCTION_COLUMN: &str = "simplified_function_name";

pub fn handle_concat_csv_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let input_dir = required_path(args, "input")?;
    let output = expand_output_path(required_arg(args, "output")?);
    let combined = csv_utils::concatenate_csvs(&input_dir, &output)
        .with_context(|| format!("Failed to concatenate CSVs from '{}'", input_dir.display()))?;
    if combined == 0 {
        info!("ℹ️ No CSV files under '{}'; wrote an empty '{}'.", input_dir.display(), output.display());
    }
    Ok(())
}

/// Renumbers `finding_id` across every input/output pair with one counter, so
/// ids stay unique over the whole batch.
pub fn renumber_finding_ids(pairs: &[(&Path, &Path)], counter: &mut UniqueIdCounter) -> Result<()> {
    for (input, output) in pairs {
        let origin = input.display().to_string();
        csv_utils::transform_csv(
            input,
            output,
            |header| {
                csv_utils::column_index(header, FINDING_ID_COLUMN, &origin)?;
                csv_utils::keep_header(header)
            },
            |orig_header, _new_header, row, _| counter.assign(orig_header, row),
        )
        .with_context(|| format!("Failed to renumber finding ids in '{}'", input.display()))?;
    }
    Ok(())
}

pub fn handle_unique_ids_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let files = arg_values(args, "files");
    if files.len() % 2 != 0 {
        bail!("❌ unique-ids expects INPUT OUTPUT pairs, got {} path(s).", files.len());
    }
    let outputs: Vec<_> = files.chunks(2).map(|pair| expand_output_path(pair[1])).collect();
    let pairs: Vec<(&Path, &Path)> = files
        .chunks(2)
        .zip(&outputs)
        .map(|(pair, output)| (Path::new(pair[0].as_str()), output.as_path()))
        .collect();

    let mut counter = UniqueIdCounter::new();
    renumber_finding_ids(&pairs, &mut counter)?;
    info!("🔢 Assigned {} finding id(s) across {} file(s).", counter.next_id() - 1, pairs.len());
    Ok(())
}

/// Copies `input` to `output` with the parsed test case name columns appended.
///
/// The file name is read from `filename_column` (paths are reduced to their
/// base name). Names outside the grammar get blank columns. With
/// `function_column`, a `simplified_function_name` column is appended too.
pub fn annotate_testcase_columns(
    input: &Path,
    output: &Path,
    filename_column: &str,
    function_column: Option<&str>,
) -> Result<()> {
    let origin = input.display().to_string();
    csv_utils::transform_csv(
        input,
        output,
        |header| {
            let filename_index = csv_utils::column_index(header, filename_column, &origin)?;
            let function_index = function_column
                .map(|column| csv_utils::column_index(header, column, &origin))
                .transpose()?;

            let mut new_header = header.to_vec();
            new_header.extend(TestCaseFileName::default().columns().map(|(name, _)| name.to_string()));
            if function_index.is_some() {
                new_header.push(SIMPLIFIED_FUNCTION_COLUMN.to_string());
            }
            Ok((new_header, (filename_index, function_index)))
        },
        |_orig_header, _new_header, mut row: Record, indexes: &mut (usize, Option<usize>)| {
            let (filename_index, function_index) = *indexes;
            let cell = |index: usize| row.get(index).cloned().unwrap_or_default();
            let parsed = parse_testcase_filename(&file_name_of(&cell(filename_index)));
            let simplified = function_index.map(|index| simplify_function_name(&cell(index)));

            row.extend(parsed.columns().into_iter().map(|(_, value)| value));
            row.extend(simplified);
            Ok(row)
        },
    )
    .with_context(|| format!("Failed to annotate '{}'", input.display()))?;
    Ok(())
}

pub fn handle_annotate_csv_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let input = required_path(args, "input")?;
    let output = expand_output_path(required_arg(args, "output")?);
    let filename_column = args
        .get_one::<String>("column")
        .unwrap_or(&master_config.app_settings.annotate_filename_column);
    let function_column = args.get_one::<String>("function-column").map(String::as_str);

    annotate_testcase_columns(&input, &output, filename_column, function_column)?;
    info!("📝 Annotated '{}' into '{}'.", input.display(), output.display());
    Ok(())
}

pub fn handle_weakness_classes_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let file = required_path(args, "file")?;
    let classes = weakness_classes::map_weakness_classes(&file)
        .with_context(|| format!("Failed to read weakness classes from '{}'", file.display()))?;
    for (cwe, weakness_classes) in &classes {
        println!("{}\t{}", cwe, weakness_classes.join("; "));
    }
    Ok(())
}
