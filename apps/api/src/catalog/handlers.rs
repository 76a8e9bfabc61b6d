//! Axum route handlers for the Catalog API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::catalog::data::{CatalogDoc, PackDefinition};
use crate::catalog::resolver::{find_pack, industry_label, CatalogStats};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackListResponse {
    pub industry: String,
    pub label: &'static str,
    pub packs: Vec<PackDefinition>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListResponse {
    pub industry: String,
    pub label: &'static str,
    pub documents: Vec<CatalogDoc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackDocumentsResponse {
    pub industry: String,
    pub pack: PackDefinition,
    pub documents: Vec<CatalogDoc>,
}

fn known_industry(industry: &str) -> Result<&'static str, AppError> {
    industry_label(industry).ok_or_else(|| AppError::NotFound(format!("Unknown industry '{industry}'")))
}

/// GET /api/v1/catalog/stats
pub async fn handle_catalog_stats(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(state.catalog.stats())
}

/// GET /api/v1/catalog/:industry/packs
pub async fn handle_list_packs(
    State(state): State<AppState>,
    Path(industry): Path<String>,
) -> Result<Json<PackListResponse>, AppError> {
    let label = known_industry(&industry)?;
    let packs = state.catalog.packs(&industry);
    Ok(Json(PackListResponse {
        industry,
        label,
        packs,
    }))
}

/// GET /api/v1/catalog/:industry/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Path(industry): Path<String>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let label = known_industry(&industry)?;
    let documents = state.catalog.documents(&industry);
    Ok(Json(DocumentListResponse {
        industry,
        label,
        documents,
    }))
}

/// GET /api/v1/catalog/:industry/packs/:pack/documents
pub async fn handle_pack_documents(
    State(state): State<AppState>,
    Path((industry, pack_id)): Path<(String, String)>,
) -> Result<Json<PackDocumentsResponse>, AppError> {
    known_industry(&industry)?;
    let pack = *find_pack(&industry, &pack_id)
        .ok_or_else(|| AppError::NotFound(format!("Pack '{pack_id}' is not offered for '{industry}'")))?;
    let documents = state.catalog.pack_documents(&industry, &pack_id);
    Ok(Json(PackDocumentsResponse {
        industry,
        pack,
        documents,
    }))
}
