//! Tabrelay - Minimal HTTP relay for LLM-backed tabular document analysis
//!
//! This library relays two operations to an OpenAI-compatible completion
//! service: credential validation against the model-listing endpoint, and
//! analysis of an uploaded CSV document via chat completion.

pub mod cli;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod telemetry;
pub mod upstream;
