//! Stance Forecast CLI entry point.

use anyhow::Result;
use clap::Parser;

use stance_forecast::cli::{commands, Cli, Commands};
use stance_forecast::infrastructure::{ConfigLoader, LogConfig, LoggerImpl};
use stance_forecast::Config;

/// Merged settings before clamping; normalize once the logger is up.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = ConfigLoader::load_unnormalized(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let raw_config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => stance_forecast::cli::handle_error(err, json_mode),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&raw_config.logging)) {
        Ok(logger) => logger,
        Err(err) => stance_forecast::cli::handle_error(err, json_mode),
    };
    let config = ConfigLoader::normalize(raw_config);

    let result = match cli.command {
        Commands::Forecast(args) => commands::forecast::execute(args, &config, json_mode),
        Commands::Impact(args) => commands::impact::execute(args, &config, json_mode),
        Commands::Compare(args) => commands::compare::execute(args, json_mode),
        Commands::Simulate(args) => commands::simulate::execute(args, &config, json_mode),
        Commands::Sensitivity(args) => commands::sensitivity::execute(args, &config, json_mode),
    };

    if let Err(err) = result {
        stance_forecast::cli::handle_error(err, json_mode);
    }
}
