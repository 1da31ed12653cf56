//! Shared domain types and configuration for trendscout.
//!
//! Holds the video/analysis/scenario records exchanged between pipeline
//! stages, the validated pipeline request, env-backed application
//! configuration, and the display helpers used by the CLI.

pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::{load_app_config, load_app_config_from_env, AppConfig};
pub use error::{ConfigError, ValidationError};
pub use types::{
    PipelineRequest, PipelineResult, PopularityAnalysis, PopularityFactor, RiskLevel,
    Scenario, ScenarioBeat, Sentiment, ShootingGuide, ShootingTip, Video,
};
