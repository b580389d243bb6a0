//! Command-line interface entry point for `creditaudit`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use credit_audit::config::Config;
use credit_audit::info;
use credit_audit::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        if let Some(parent) = log_path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                eprintln!("✗ Failed to create log directory: {}", parent.display());
            }
        }
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Analyze {
            input_file,
            department,
            format,
            output,
        } => {
            let options = commands::analyze::AnalyzeOptions {
                department: department.as_deref(),
                format,
                output: output.as_deref(),
            };
            if let Err(err) = commands::analyze::run(&input_file, &options, &config) {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
        Command::Departments => {
            if let Err(err) = commands::departments::run(&config) {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }
}
