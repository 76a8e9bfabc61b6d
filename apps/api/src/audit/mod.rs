//! Compliance audit: benchmark resolution, per-file analysis, scoring and persistence.

pub mod benchmark;
pub mod classifier;
pub mod excerpt;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod recommendations;
pub mod repository;
pub mod scoring;
