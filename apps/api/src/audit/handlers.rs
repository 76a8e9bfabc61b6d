//! Axum route handlers for the Audit API.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::audit::models::{BusinessProfile, SessionStatus};
use crate::audit::pipeline::{AuditPipeline, SessionOutcome};
use crate::audit::repository::{
    find_session, insert_audit_session, insert_business_profile, insert_file_upload,
    list_session_files, StoredUpload,
};
use crate::errors::AppError;
use crate::models::audit::AuditFileRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAuditRequest {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub industry: String,
    pub sub_industry: Option<String>,
    #[serde(default)]
    pub city: String,
    pub region: Option<String>,
    pub org_size: Option<String>,
    pub abn: Option<String>,
    pub user_email: Option<String>,
    /// Uploads already written to the document store for this session.
    #[serde(default)]
    pub files: Vec<StoredUpload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedSession {
    pub id: Uuid,
    pub session_token: Uuid,
    pub business_profile_id: Uuid,
    pub status: SessionStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAuditResponse {
    pub success: bool,
    pub audit_session: StartedSession,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionKey {
    pub audit_session_id: Uuid,
    pub session_token: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedSession {
    pub id: Uuid,
    pub status: String,
    pub compliance_score: Option<i32>,
    pub audit_results: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAuditResponse {
    pub success: bool,
    pub message: String,
    pub audit_session: ProcessedSession,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResults {
    pub id: Uuid,
    pub status: String,
    pub compliance_score: Option<i32>,
    pub audit_results: Option<Value>,
    pub recommendations: Option<Value>,
    pub missing_policies: Option<Value>,
    pub outdated_documents: Option<Value>,
    pub completed_checks: Option<Value>,
    pub total_files: i32,
    pub processed_files: i32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub business_name: String,
    pub industry: String,
    pub city: String,
    pub region: Option<String>,
    pub org_size: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResultsResponse {
    pub success: bool,
    pub audit_session: SessionResults,
    pub business_profile: ProfileSummary,
    pub uploaded_files: Vec<AuditFileRow>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl StartAuditRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.business_name.trim().is_empty()
            || self.industry.trim().is_empty()
            || self.city.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Missing required fields: businessName, industry, city".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/audit/start
///
/// Creates the business profile and a pending session. Returns the token the
/// caller must present to process or read the session.
pub async fn handle_start_audit(
    State(state): State<AppState>,
    Json(request): Json<StartAuditRequest>,
) -> Result<Json<StartAuditResponse>, AppError> {
    request.validate()?;

    let session_token = Uuid::new_v4();
    let profile = BusinessProfile {
        business_name: request.business_name.trim().to_string(),
        industry: request.industry.trim().to_string(),
        sub_industry: non_blank(request.sub_industry),
        city: request.city.trim().to_string(),
        region: non_blank(request.region),
        org_size: non_blank(request.org_size),
        abn: non_blank(request.abn),
    };

    let profile_metadata = json!({
        "userEmail": non_blank(request.user_email),
        "createdViaAudit": true,
        "sessionToken": session_token,
    });
    let business_profile_id = insert_business_profile(&state.db, &profile, &profile_metadata).await?;

    let session_metadata = json!({ "startedAt": Utc::now().to_rfc3339() });
    let session = insert_audit_session(
        &state.db,
        business_profile_id,
        session_token,
        request.files.len() as i32,
        &session_metadata,
    )
    .await?;

    for upload in &request.files {
        insert_file_upload(&state.db, session.id, upload).await?;
    }

    info!(
        "Audit session started: {} for business: {}",
        session.id, profile.business_name
    );

    Ok(Json(StartAuditResponse {
        success: true,
        audit_session: StartedSession {
            id: session.id,
            session_token,
            business_profile_id,
            status: SessionStatus::Pending,
        },
        message: "Audit session created successfully".to_string(),
    }))
}

/// POST /api/v1/audit/process
///
/// Runs the full audit for a stored session. Completed sessions are returned as-is.
pub async fn handle_process_audit(
    State(state): State<AppState>,
    Json(key): Json<SessionKey>,
) -> Result<Json<ProcessAuditResponse>, AppError> {
    let pipeline = AuditPipeline::new(
        state.llm.as_ref(),
        state.documents.as_deref(),
        &state.benchmarks,
    );

    let response = match pipeline
        .process_session(&state.db, key.audit_session_id, key.session_token)
        .await?
    {
        SessionOutcome::AlreadyCompleted(session) => ProcessAuditResponse {
            success: true,
            message: "Audit already completed".to_string(),
            audit_session: ProcessedSession {
                id: session.id,
                status: session.status,
                compliance_score: session.compliance_score,
                audit_results: session.audit_results,
            },
        },
        SessionOutcome::Completed {
            session_id,
            results,
        } => ProcessAuditResponse {
            success: true,
            message: "Audit processing completed successfully".to_string(),
            audit_session: ProcessedSession {
                id: session_id,
                status: SessionStatus::Completed.as_str().to_string(),
                compliance_score: Some(results.compliance_score as i32),
                audit_results: Some(
                    serde_json::to_value(&results).map_err(|e| AppError::Internal(e.into()))?,
                ),
            },
        },
    };

    Ok(Json(response))
}

/// GET /api/v1/audit/results
pub async fn handle_audit_results(
    State(state): State<AppState>,
    Query(key): Query<SessionKey>,
) -> Result<Json<AuditResultsResponse>, AppError> {
    let (session, profile) = find_session(&state.db, key.audit_session_id, key.session_token)
        .await?
        .ok_or_else(|| AppError::NotFound("Audit session not found or invalid token".to_string()))?;

    let uploaded_files = list_session_files(&state.db, session.id).await?;

    Ok(Json(AuditResultsResponse {
        success: true,
        audit_session: SessionResults {
            id: session.id,
            status: session.status,
            compliance_score: session.compliance_score,
            audit_results: session.audit_results,
            recommendations: session.recommendations,
            missing_policies: session.missing_policies,
            outdated_documents: session.outdated_documents,
            completed_checks: session.completed_checks,
            total_files: session.total_files,
            processed_files: session.processed_files,
            created_at: session.created_at,
            completed_at: session.completed_at,
        },
        business_profile: ProfileSummary {
            business_name: profile.business_name,
            industry: profile.industry,
            city: profile.city,
            region: profile.region,
            org_size: profile.org_size,
        },
        uploaded_files,
    }))
}
