mod cli;
mod commands;
mod errors;
mod files;
mod ui;

use clap::Parser;
use indicatif_log_bridge::LogWrapper;
use log::LevelFilter;
use std::process::ExitCode;

use cli::{SiftCli, SiftCliCommand};
use sift_client::ClientConfig;

fn main() -> ExitCode {
    let cli = SiftCli::parse();
    init_logging(cli.verbose);

    let config = ClientConfig::new(
        cli.base_url.clone().unwrap_or_default(),
        cli.api_key.clone().unwrap_or_default(),
    );

    let result = match cli.command {
        SiftCliCommand::Compile { file } => commands::compile_file(&file, cli.format),
        SiftCliCommand::Run { file } => commands::run_file(&file, &config, cli.format),
        SiftCliCommand::Attributes => commands::list_attributes(&config, cli.format),
        SiftCliCommand::Operators { r#type, field } => {
            commands::list_operators(r#type, field, cli.format)
        }
        SiftCliCommand::Build { save, run } => {
            commands::build_filter(&config, save, run, cli.format)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Route log output through the progress bars so spinners are not torn.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let logger = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .build();
    let max_level = logger.filter();

    if LogWrapper::new(ui::progress().clone(), logger)
        .try_init()
        .is_ok()
    {
        log::set_max_level(max_level);
    }
}
