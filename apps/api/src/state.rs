use std::sync::Arc;

use sqlx::PgPool;

use crate::audit::benchmark::BenchmarkResolver;
use crate::audit::excerpt::DocumentStore;
use crate::catalog::cache::CatalogCache;
use crate::config::Config;
use crate::documents::engine::TemplateEngine;
use crate::llm_client::{InferenceBackend, InferenceClient};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Everything that submits prompts goes through this seam.
    pub llm: Arc<dyn InferenceBackend>,
    /// Concrete client, kept for the health check.
    pub inference: InferenceClient,
    pub benchmarks: BenchmarkResolver,
    /// Upload bytes for excerpts. `None` skips excerpts entirely.
    pub documents: Option<Arc<dyn DocumentStore>>,
    /// Built and warmed once at startup.
    pub catalog: Arc<CatalogCache>,
    pub templates: Arc<TemplateEngine>,
    pub config: Config,
}
