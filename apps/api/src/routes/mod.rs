pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::audit::handlers as audit;
use crate::catalog::handlers as catalog;
use crate::documents::handlers as documents;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/inference/health",
            get(health::inference_health_handler),
        )
        // Audit API
        .route("/api/v1/audit/start", post(audit::handle_start_audit))
        .route("/api/v1/audit/process", post(audit::handle_process_audit))
        .route("/api/v1/audit/results", get(audit::handle_audit_results))
        // Catalog API
        .route("/api/v1/catalog/stats", get(catalog::handle_catalog_stats))
        .route(
            "/api/v1/catalog/:industry/packs",
            get(catalog::handle_list_packs),
        )
        .route(
            "/api/v1/catalog/:industry/documents",
            get(catalog::handle_list_documents),
        )
        .route(
            "/api/v1/catalog/:industry/packs/:pack/documents",
            get(catalog::handle_pack_documents),
        )
        // Documents API
        .route(
            "/api/v1/documents/render",
            post(documents::handle_render_document),
        )
        .route("/api/v1/documents/pack", post(documents::handle_render_pack))
        .route(
            "/api/v1/documents/generate",
            post(documents::handle_generate_document),
        )
        .with_state(state)
}
