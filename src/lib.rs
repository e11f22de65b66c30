//! Category Learning Experiment
//!
//! A single-session category-learning study run in the terminal:
//! - Participant dialog and random A/B group assignment
//! - Learning phase with illustrated category instructions
//! - Randomised test items with yes/no judgements and 1-7 typicality ratings
//! - Append-only CSV results log

pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod phases;
pub mod results;
pub mod session;
pub mod stimuli;
pub mod telemetry;

// Re-exports for convenience
pub use config::ExperimentConfig;
pub use error::{ExperimentError, Result};
pub use phases::{run_session, SessionContext, SessionOutcome};
pub use results::ResponseLogger;
pub use session::{Decision, Group, ParticipantSession, Rating, Response};
