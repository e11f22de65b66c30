//! Category Learning Experiment
//!
//! Runs one participant session in the terminal and appends the responses
//! to the results CSV.

use anyhow::{Context, Result};
use tracing::{error, info};

use category_learning::display::TerminalSurface;
use category_learning::input::TerminalKeys;
use category_learning::{run_session, telemetry, ExperimentConfig, ResponseLogger, SessionOutcome};

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let (config, config_file) = ExperimentConfig::load().context("Failed to load configuration")?;
    let _log_guard = telemetry::init_logging(&config.log_dir)?;
    if let Some(path) = &config_file {
        info!("Loaded configuration from {}", path.display());
    }
    info!("Starting session with {:?}", config);

    let logger = ResponseLogger::new(&config.results_file);
    let mut rng = config.rng();

    // The surface restores the terminal when it goes out of scope, before
    // anything is printed below
    let outcome = {
        let mut surface = TerminalSurface::open(config.canvas).context("Failed to open display surface")?;
        let mut keys = TerminalKeys;
        run_session(&mut surface, &mut keys, &mut rng, &config.asset_dir, &logger)
    };

    match outcome {
        Ok(SessionOutcome::Cancelled) => {
            info!("Session cancelled");
        }
        Ok(SessionOutcome::Completed { session, responses }) => {
            info!(
                "Session complete: participant '{}', group {}, {} responses",
                session.identifier(),
                session.group(),
                responses.len()
            );
            println!("Responses saved to {}", logger.path().display());
        }
        Err(e) => {
            error!("Session failed: {}", e);
            return Err(e).context("Session failed");
        }
    }

    Ok(())
}
