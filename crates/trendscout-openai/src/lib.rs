//! Chat-completions transport for the narrative-generation stages.
//!
//! Wraps an OpenAI-compatible `/chat/completions` endpoint and exposes the
//! four pipeline operations: query generation, popularity analysis, scenario
//! creation, and the shooting guide. Completion text is free-form; the JSON
//! payload is pulled out with a balanced-span extractor before
//! deserialization.

pub mod client;
pub mod error;
pub mod json;
pub mod normalize;
pub mod queries;

pub use client::OpenAiClient;
pub use error::OpenAiError;
