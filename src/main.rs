use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use ngoboard::cli::commands::{Cli, Commands};
use ngoboard::cli;
use ngoboard::config::{AiConfig, Config};

fn init_logging() {
    let filter = EnvFilter::try_from_env("NGOBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let ai = AiConfig {
        api_key: cli_args.api_key.clone(),
        model: cli_args.ai_model.clone(),
        base_url: cli_args.ai_url.clone(),
    };
    let config = match Config::new(cli_args.data_dir.clone(), cli_args.today, ai) {
        Ok(config) => config,
        Err(e) => process::exit(cli::finish(Err(e), json_output)),
    };

    let exit_code = match cli_args.command {
        Commands::Init { reset, yes } => cli::init::run(reset, yes, &config, json_output),
        Commands::Project(cmd) => cli::project::run(cmd, &config, json_output),
        Commands::Task(cmd) => cli::task::run(cmd, &config, json_output),
        Commands::Doc(cmd) => cli::doc::run(cmd, &config, json_output),
        Commands::Report { ai } => cli::report::run(ai, &config, json_output),
        Commands::Calendar { month, project } => {
            cli::calendar::run(month.as_deref(), project.as_deref(), &config, json_output)
        }
    };

    process::exit(exit_code);
}
