//! Stage-tracked pipeline orchestration.
//!
//! Runs discovery and the three narrative-generation stages as an ordered,
//! observable sequence: a status event fires before and after every stage,
//! failures are tagged with the failing stage, and downstream stages never
//! run after an upstream failure. Progress snapshots are immutable values
//! rebuilt per event.

pub mod error;
pub mod progress;
pub mod runner;
pub mod stage;

pub use error::PipelineError;
pub use progress::{apply_stage_update, initial_progress, Progress, StageState};
pub use runner::run_pipeline;
pub use stage::{StageKey, StageStatus, StageUpdate};
