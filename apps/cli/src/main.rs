use anyhow::Context;
use clap::Parser;
use concil::domain::config::AppConfig;
use concil::kernel::config::load_config;
use concil_cli::args::Cli;
use concil_logger::{Logger, parse_level, parse_rotation};
use std::io;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut cfg: AppConfig =
        load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;
    if let Some(level) = cli.log_level {
        cfg.logging.level = level;
    }

    let _log = init_logger(&cfg)?;
    tracing::debug!(command = ?cli.command, "Running command");

    let succeeded = concil_cli::execute(cfg, &cli.command, &mut io::stdout().lock())?;
    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_logger(cfg: &AppConfig) -> anyhow::Result<Logger> {
    let logging = &cfg.logging;
    let mut builder =
        Logger::builder().name(env!("CARGO_BIN_NAME")).console(true).level(parse_level(&logging.level)?);
    if let Some(filter) = &logging.filter {
        builder = builder.env_filter(filter);
    }

    let logger = match &logging.directory {
        Some(dir) => {
            let file = builder
                .path(dir)
                .rotation(parse_rotation(&logging.rotation)?)
                .max_files(logging.max_files);
            if logging.json { file.json().init()? } else { file.init()? }
        },
        None => builder.init()?,
    };
    Ok(logger)
}
