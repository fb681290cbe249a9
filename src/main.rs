use tcman::common::logging_setup;
use tcman::config_loader::MasterConfig;
use tcman::operations::{command_op, csv_op, find_op, name_op, op_helper, split_op};
use tcman::{cli, config_loader};
use log::{info, error, debug};
use anyhow::{Result, bail};
use clap::ArgMatches;
use std::time::Instant;

fn dispatch(master_config: &MasterConfig, operation_name: &str, args: &ArgMatches) -> Result<()> {
    match operation_name {
        "parse-name" => name_op::handle_parse_name_cli(master_config, args),
        "simplify-function" => name_op::handle_simplify_function_cli(master_config, args),
        "cwe-id" => name_op::handle_cwe_id_cli(master_config, args),
        "list-variants" => split_op::handle_list_variants_cli(master_config, args),
        "split" => split_op::handle_split_cli(master_config, args),
        "find-files" => find_op::handle_find_files_cli(master_config, args),
        "find-dirs" => find_op::handle_find_dirs_cli(master_config, args),
        "clean-dir" => find_op::handle_clean_dir_cli(master_config, args),
        "concat-csv" => csv_op::handle_concat_csv_cli(master_config, args),
        "unique-ids" => csv_op::handle_unique_ids_cli(master_config, args),
        "annotate-csv" => csv_op::handle_annotate_csv_cli(master_config, args),
        "weakness-classes" => csv_op::handle_weakness_classes_cli(master_config, args),
        "run" => command_op::handle_run_cli(master_config, args),
        "elapsed" => command_op::handle_elapsed_cli(master_config, args),
        other => bail!("Subcommand '{}' not implemented.", other),
    }
}

fn main() -> Result<()> {
    let main_start_time = Instant::now();
    // Parse CLI arguments early for potential use in logging or config path
    let matches = cli::build_cli().get_matches();

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let master_config = match config_loader::load_config_or_default(config_path) {
        Ok(cfg) => {
            logging_setup::initialize_logging(Some(&cfg), &matches);
            cfg
        }
        Err(e) => {
            // Still want readable output for the failure itself
            logging_setup::initialize_logging(None, &matches);
            error!("❌ Failed to load configuration: {:#}. Exiting.", e);
            return Err(e);
        }
    };
    debug!("Configuration in effect: {:?}", master_config.app_settings);

    let Some((operation_name, sub_matches)) = matches.subcommand() else {
        info!("🤔 No subcommand provided. Run with --help to list the available operations.");
        return Ok(());
    };

    debug!("🎬 Dispatching to subcommand: {}", operation_name);
    let op_result = op_helper::run_timed(operation_name, || dispatch(&master_config, operation_name, sub_matches));
    if let Err(e) = op_result {
        error!("❌ Operation '{}' failed after {:?}: {:#}", operation_name, main_start_time.elapsed(), e);
        return Err(e);
    }

    debug!("🏁 tcman finished in {:?}.", main_start_time.elapsed());
    Ok(())
}
