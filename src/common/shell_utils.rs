use crate::common::{file_utils, timestamp_utils};
use crate::errors::AppError;
use chrono::Local;
use log::{debug, info};
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::time::Instant;

fn shell_command(line: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", line]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", line]);
        cmd
    }
}

fn check_status(command: &str, status: std::io::Result<ExitStatus>) -> Result<(), AppError> {
    let status = status.map_err(|e| AppError::Command {
        command: command.to_string(),
        details: format!("could not be started: {}", e),
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(AppError::Command {
            command: command.to_string(),
            details: format!("exited with {}", status),
        })
    }
}

/// Runs `commands` as one `a && b && c` line with inherited stdio.
///
/// With `use_shell` the line goes through the platform shell, which is
/// required for builtins such as `cd`. Otherwise every command is split on
/// whitespace and run directly, in order, stopping at the first failure.
/// A non-zero exit is an error.
pub fn run_commands<S: AsRef<str>>(commands: &[S], use_shell: bool) -> Result<(), AppError> {
    let command = commands.iter().map(|c| c.as_ref()).collect::<Vec<&str>>().join(" && ");

    let time_started = Local::now();
    let timer = Instant::now();
    info!("Started command: \"{}\" ({})", command, timestamp_utils::ctime_of(&time_started));

    if use_shell {
        check_status(&command, shell_command(&command).status())?;
    } else {
        for single in commands {
            let mut tokens = single.as_ref().split_whitespace();
            let Some(program) = tokens.next() else {
                debug!("Skipping empty command in \"{}\"", command);
                continue;
            };
            let status = Command::new(program).args(tokens).status();
            check_status(&command, status)?;
        }
    }

    info!("Finished command: \"{}\" ({})", command, timestamp_utils::ctime_of(&Local::now()));
    info!("Command \"{}\" took {} seconds to complete.", command, timer.elapsed().as_secs_f64());
    Ok(())
}

/// Calls `run_analysis_fx(directory, file_name)` for every file under
/// `test_case_path` whose name matches `build_file_regex`.
///
/// The directory is passed explicitly; the process working directory is never
/// changed. Returns the number of build files processed.
pub fn run_analysis<F, E>(test_case_path: &Path, build_file_regex: &str, mut run_analysis_fx: F) -> Result<usize, E>
where
    F: FnMut(&Path, &str) -> Result<(), E>,
    E: From<AppError>,
{
    let time_started = Local::now();
    let timer = Instant::now();

    let files = file_utils::find_files_in_dir(test_case_path, build_file_regex, true)?;
    for file in &files {
        let directory = file.parent().unwrap_or(test_case_path);
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Running analysis for '{}' in '{}'", file_name, directory.display());
        run_analysis_fx(directory, &file_name)?;
    }

    info!("Started: {}", timestamp_utils::ctime_of(&time_started));
    info!("Ended: {}", timestamp_utils::ctime_of(&Local::now()));
    info!("Elapsed time: {}", timestamp_utils::format_elapsed(timer.elapsed().as_secs_f64()));
    Ok(files.len())
}
