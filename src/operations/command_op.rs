use super::op_helper::arg_values;
use crate::common::{shell_utils, timestamp_utils};
use crate::config_loader::MasterConfig;
use anyhow::{Context, Result};
use clap::ArgMatches;

pub fn handle_run_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let commands = arg_values(args, "commands");
    let use_shell = args.get_flag("shell") || master_config.app_settings.use_shell;
    shell_utils::run_commands(&commands, use_shell).context("Command run failed")?;
    Ok(())
}

pub fn handle_elapsed_cli(_master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let seconds = args
        .get_one::<f64>("seconds")
        .copied()
        .context("Missing required argument 'seconds'")?;
    println!("{}", timestamp_utils::format_elapsed(seconds));
    Ok(())
}
