//! CLI tool to check the built fixtures against their invariants.
//!
//! Usage:
//!   cargo run --bin verify-fixtures
//!
//! Prints one line per violation and exits non-zero when any is found.

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use deploy_insights_lib::config::Config;
use deploy_insights_lib::fixtures::{build_fixtures, check_invariants};
use deploy_insights_lib::seed::standard_inputs;

fn main() {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let fixtures = match standard_inputs().and_then(|inputs| build_fixtures(inputs, &config.synthesis_options())) {
        Ok(fixtures) => fixtures,
        Err(e) => {
            error!("Failed to build fixtures: {}", e);
            std::process::exit(1);
        }
    };

    let violations = check_invariants(&fixtures);
    for violation in &violations {
        println!("{}", violation);
    }

    if violations.is_empty() {
        info!(
            "All invariants hold: {} attempts, {} test runs, {} cluster test runs",
            fixtures.list_deployment_attempts().len(),
            fixtures.list_test_runs().len(),
            fixtures.list_cluster_test_runs().len()
        );
    } else {
        eprintln!("{} invariant violation(s)", violations.len());
        std::process::exit(1);
    }
}
