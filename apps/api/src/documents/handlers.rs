//! Axum route handlers for the Documents API.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::resolver::{find_industry, validate_pack};
use crate::documents::engine::{RenderedDocument, TemplateEngine};
use crate::documents::envelope::{Artifact, DocumentFormat};
use crate::documents::generator::{DocumentGenerator, GenerationError};
use crate::documents::placeholders::TemplateData;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_render_formats() -> Vec<DocumentFormat> {
    vec![DocumentFormat::Pdf, DocumentFormat::Docx]
}

fn default_generate_format() -> DocumentFormat {
    DocumentFormat::Docx
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub industry: String,
    pub document_id: String,
    #[serde(default = "default_render_formats")]
    pub formats: Vec<DocumentFormat>,
    #[serde(default)]
    pub business_data: TemplateData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub success: bool,
    pub document_id: String,
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackRequest {
    pub industry: String,
    pub pack_id: String,
    #[serde(default)]
    pub business_data: TemplateData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackResponse {
    pub success: bool,
    pub industry: String,
    pub pack_id: String,
    pub documents: Vec<RenderedDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub industry: String,
    pub document_type: String,
    #[serde(default = "default_generate_format")]
    pub format: DocumentFormat,
    #[serde(default)]
    pub business_data: TemplateData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub document_type: String,
    pub artifact: Artifact,
}

/// Catalog-style ids only: lowercase letters, digits, `-` and `_`.
fn validate_id(field: &str, value: &str) -> Result<(), AppError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Invalid {field}: '{value}'")))
    }
}

impl RenderRequest {
    fn validate(&self) -> Result<(), AppError> {
        validate_id("industry", &self.industry)?;
        validate_id("documentId", &self.document_id)?;
        if self.formats.is_empty() {
            return Err(AppError::Validation("At least one format is required".to_string()));
        }
        Ok(())
    }
}

impl GenerateRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.document_type.trim().is_empty() || self.industry.trim().is_empty() {
            return Err(AppError::Validation(
                "Missing required fields: documentType, industry".to_string(),
            ));
        }
        let has_business = self
            .business_data
            .business_name
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty());
        if !has_business {
            return Err(AppError::Validation(
                "Missing required field: businessData.businessName".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        match &e {
            GenerationError::Llm(inner) => AppError::Llm(inner.to_string()),
            GenerationError::TooShort(_) => AppError::UnprocessableEntity(e.to_string()),
        }
    }
}

/// Runs synchronous template work off the async runtime.
async fn on_blocking<T, F>(engine: &Arc<TemplateEngine>, work: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&TemplateEngine) -> T + Send + 'static,
{
    let engine = Arc::clone(engine);
    tokio::task::spawn_blocking(move || work(&engine))
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/render
pub async fn handle_render_document(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    request.validate()?;

    let RenderRequest {
        industry,
        document_id,
        formats,
        business_data,
    } = request;

    let id = document_id.clone();
    let artifacts = on_blocking(&state.templates, move |engine| {
        engine.render(&industry, &id, &business_data, &formats)
    })
    .await?;

    Ok(Json(RenderResponse {
        success: true,
        document_id,
        artifacts,
    }))
}

/// POST /api/v1/documents/pack
///
/// Renders every document in a pack in the pack's formats.
pub async fn handle_render_pack(
    State(state): State<AppState>,
    Json(request): Json<PackRequest>,
) -> Result<Json<PackResponse>, AppError> {
    if find_industry(&request.industry).is_none() {
        return Err(AppError::NotFound(format!("Unknown industry '{}'", request.industry)));
    }
    if !validate_pack(&request.industry, &request.pack_id) {
        return Err(AppError::NotFound(format!(
            "Pack '{}' is not available for {}",
            request.pack_id, request.industry
        )));
    }

    let PackRequest {
        industry,
        pack_id,
        business_data,
    } = request;

    let (i, p) = (industry.clone(), pack_id.clone());
    let catalog = Arc::clone(&state.catalog);
    let documents = on_blocking(&state.templates, move |engine| {
        engine.render_pack(&catalog, &i, &p, &business_data)
    })
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Pack '{pack_id}' is not available for {industry}")))?;

    info!("Rendered {} documents for {industry}/{pack_id}", documents.len());

    Ok(Json(PackResponse {
        success: true,
        industry,
        pack_id,
        documents,
    }))
}

/// POST /api/v1/documents/generate
///
/// AI-written document, packaged the same way as catalog templates.
pub async fn handle_generate_document(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    request.validate()?;

    let markdown = DocumentGenerator::new(state.llm.as_ref())
        .generate(&request.document_type, &request.industry, &request.business_data)
        .await?;

    let GenerateRequest {
        industry,
        document_type,
        format,
        business_data,
    } = request;

    let title = document_type.trim().to_string();
    let document_id = title.to_lowercase().replace(' ', "-");
    let data = TemplateData {
        industry: business_data.industry.clone().or(Some(industry)),
        document_type: Some(title.clone()),
        ..business_data
    };

    let mut artifacts = on_blocking(&state.templates, move |engine| {
        engine.render_markdown(&markdown, &document_id, &title, &data, &[format])
    })
    .await?;
    let artifact = artifacts
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("No artifact rendered")))?;

    Ok(Json(GenerateResponse {
        success: true,
        document_type,
        artifact,
    }))
}
