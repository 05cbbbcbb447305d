//! Deploy insights - fixture CLI entry point.
//!
//! Builds the fixture set once and prints one collection, the summary, the
//! digest or the schema document.

use std::env;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use deploy_insights_lib::config::Config;
use deploy_insights_lib::fixtures::build_fixtures;
use deploy_insights_lib::output::{self, CliArgs, USAGE};
use deploy_insights_lib::seed::standard_inputs;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", USAGE);
        return;
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pure JSON
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let cli = match CliArgs::parse(args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("Check the DI_* environment variables");
            std::process::exit(1);
        }
    };

    let fixtures = if cli.command.needs_fixtures() {
        let inputs = match standard_inputs() {
            Ok(inputs) => inputs,
            Err(e) => {
                error!("Failed to load seed tables: {}", e);
                std::process::exit(1);
            }
        };
        match build_fixtures(inputs, &config.synthesis_options()) {
            Ok(fixtures) => Some(fixtures),
            Err(e) => {
                error!("Failed to build fixtures: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let result = output::render(cli.command, fixtures.as_ref(), cli.pretty(config.pretty))
        .and_then(|body| output::emit(&body, cli.out.as_ref()));
    if let Err(e) = result {
        error!("Failed to write output: {}", e);
        std::process::exit(1);
    }

    if let Some(path) = &cli.out {
        info!("Wrote {:?} to {}", cli.command, path.display());
    }
}
