use clap::{Arg, ArgAction, Command};
use log::debug;
use std::time::Instant;

pub fn build_cli() -> Command {
    debug!("⚙️ Building CLI interface...");
    let start_time = Instant::now();
    let cmd = Command::new("tcman")
        .version("0.1.0")
        .author("tcman Developers")
        .about("Bookkeeping tools for a CWE test case corpus: name parsing, directory splitting, CSV plumbing.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom configuration file")
                .global(true)
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("parse-name")
                .about("Breaks test case file names into CWE, functional variant, flow variant, subfile and language")
                .arg(Arg::new("names").value_name("FILE_NAME").required(true).num_args(1..).help("Test case file names or paths").action(ArgAction::Append))
                .arg(Arg::new("primary").long("primary").help("Only accept the primary file of each test case").action(ArgAction::SetTrue))
        )
        .subcommand(
            Command::new("simplify-function")
                .about("Strips the test case prefix from C/C++ function names")
                .arg(Arg::new("names").value_name("FUNCTION").required(true).num_args(1..).action(ArgAction::Append))
        )
        .subcommand(
            Command::new("list-variants")
                .about("Lists the functional variants found in a test case directory")
                .arg(Arg::new("dir").value_name("DIR").required(true).action(ArgAction::Set))
        )
        .subcommand(
            Command::new("split")
                .about("Moves a flat CWE directory into s01, s02, ... subdirectories by functional variant")
                .arg(Arg::new("dir").value_name("DIR").required(true).action(ArgAction::Set))
                .arg(Arg::new("limit").long("limit").value_name("FILES").help("Soft file count limit per subdirectory (default: from config)").value_parser(clap::value_parser!(usize)).action(ArgAction::Set))
                .arg(Arg::new("dry-run").long("dry-run").help("Print the planned layout without moving anything").action(ArgAction::SetTrue))
        )
        .subcommand(
            Command::new("find-files")
                .about("Recursively lists files whose name matches a case-insensitive regex")
                .arg(Arg::new("dir").value_name("DIR").required(true).action(ArgAction::Set))
                .arg(Arg::new("regex").value_name("REGEX").required(true).action(ArgAction::Set))
                .arg(Arg::new("verbose").long("verbose").short('v').help("Report names that did not match").action(ArgAction::SetTrue))
        )
        .subcommand(
            Command::new("find-dirs")
                .about("Recursively lists directories whose name matches a case-insensitive regex")
                .arg(Arg::new("dir").value_name("DIR").required(true).action(ArgAction::Set))
                .arg(Arg::new("regex").value_name("REGEX").required(true).action(ArgAction::Set))
                .arg(Arg::new("verbose").long("verbose").short('v').help("Report names that did not match").action(ArgAction::SetTrue))
        )
        .subcommand(
            Command::new("concat-csv")
                .about("Concatenates every CSV under a directory into one file with a single header")
                .arg(Arg::new("input").value_name("INPUT_DIR").required(true).action(ArgAction::Set))
                .arg(Arg::new("output").value_name("OUTPUT_CSV").required(true).action(ArgAction::Set))
        )
        .subcommand(
            Command::new("unique-ids")
                .about("Renumbers the finding_id column of one or more CSVs with a shared counter")
                .arg(Arg::new("files").value_name("CSV").required(true).num_args(2..).help("Input/output pairs").action(ArgAction::Append))
        )
        .subcommand(
            Command::new("annotate-csv")
                .about("Appends the parsed test case name columns to a CSV")
                .arg(Arg::new("input").value_name("INPUT_CSV").required(true).action(ArgAction::Set))
                .arg(Arg::new("output").value_name("OUTPUT_CSV").required(true).action(ArgAction::Set))
                .arg(Arg::new("column").long("column").value_name("NAME").help("Column holding test case file names (default: from config)").action(ArgAction::Set))
                .arg(Arg::new("function-column").long("function-column").value_name("NAME").help("Also append a simplified_function_name column derived from this column").action(ArgAction::Set))
        )
        .subcommand(
            Command::new("weakness-classes")
                .about("Prints the CWE to weakness class mapping of a CSV")
                .arg(Arg::new("file").value_name("CSV").required(true).action(ArgAction::Set))
        )
        .subcommand(
            Command::new("cwe-id")
                .about("Extracts the CWE id (and split subdirectory) from test case paths")
                .arg(Arg::new("paths").value_name("PATH").required(true).num_args(1..).action(ArgAction::Append))
        )
        .subcommand(
            Command::new("run")
                .about("Runs commands joined with &&, timing the whole run")
                .arg(Arg::new("commands").value_name("COMMAND").required(true).num_args(1..).action(ArgAction::Append))
                .arg(Arg::new("shell").long("shell").help("Run through the system shell (default: from config)").action(ArgAction::SetTrue))
        )
        .subcommand(
            Command::new("clean-dir")
                .about("Creates a directory, or empties it if it already exists")
                .arg(Arg::new("dir").value_name("DIR").required(true).action(ArgAction::Set))
        )
        .subcommand(
            Command::new("elapsed")
                .about("Formats a number of seconds as days, hours, minutes and seconds")
                .arg(Arg::new("seconds").value_name("SECONDS").required(true).value_parser(clap::value_parser!(f64)).allow_negative_numbers(true).action(ArgAction::Set))
        );
    debug!("✅ CLI interface built in {:?}", start_time.elapsed());
    cmd
}
