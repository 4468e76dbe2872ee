use clap::Parser;
use cubase_project_manager::cli::{
    CliCommand, CliContext, Cli, Commands, MigrateCommand, ScanCommand,
};
use cubase_project_manager::config::{Config, CONFIG};
use log::{debug, error};

fn main() {
    let cli = Cli::parse();

    if cli.no_color || !cubase_project_manager::cli::should_use_color() {
        colored::control::set_override(false);
    }

    // Load configuration first
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => CONFIG.as_ref().cloned().map_err(|e| e.clone()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    // Initialize logging with configured level
    init_logging(&config.log_level());
    debug!("Running {:?}", cli.command);

    let ctx = CliContext::new(config, cli.format, cli.no_color);
    let result = match &cli.command {
        Commands::Scan {
            paths,
            group,
            threads,
        } => ScanCommand {
            paths: paths.clone(),
            group: *group,
            threads: *threads,
        }
        .execute(&ctx),
        Commands::Catalog { subcommand } => subcommand.execute(&ctx),
        Commands::Tag { subcommand } => subcommand.execute(&ctx),
        Commands::Migrate { path } => MigrateCommand { path: path.clone() }.execute(&ctx),
        Commands::Config { subcommand } => subcommand.execute(&ctx),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
            log::LevelFilter::Info
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
