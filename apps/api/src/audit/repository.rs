//! Audit persistence: business profiles, sessions and file uploads.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::audit::models::{AuditFile, AuditResults, BusinessProfile, SessionStatus};
use crate::models::audit::{AuditFileRow, AuditSessionRow, BusinessProfileRow};

/// Reference to an object the upload collaborator has already stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUpload {
    pub file_name: String,
    pub file_path: String,
    pub size: i64,
    pub mime_type: String,
}

pub async fn insert_business_profile(
    pool: &PgPool,
    profile: &BusinessProfile,
    metadata: &Value,
) -> Result<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO business_profiles
            (business_name, industry, sub_industry, city, region, org_size, abn, metadata)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(&profile.business_name)
    .bind(&profile.industry)
    .bind(&profile.sub_industry)
    .bind(&profile.city)
    .bind(&profile.region)
    .bind(&profile.org_size)
    .bind(&profile.abn)
    .bind(metadata)
    .fetch_one(pool)
    .await
    .context("Failed to create business profile")?;

    Ok(id)
}

pub async fn insert_audit_session(
    pool: &PgPool,
    business_profile_id: Uuid,
    session_token: Uuid,
    total_files: i32,
    metadata: &Value,
) -> Result<AuditSessionRow> {
    let row = sqlx::query_as::<_, AuditSessionRow>(
        r#"
        INSERT INTO audit_sessions
            (business_profile_id, session_token, status, total_files, processed_files, metadata)
        VALUES ($1, $2, $3, $4, 0, $5)
        RETURNING *
        "#,
    )
    .bind(business_profile_id)
    .bind(session_token)
    .bind(SessionStatus::Pending.as_str())
    .bind(total_files)
    .bind(metadata)
    .fetch_one(pool)
    .await
    .context("Failed to create audit session")?;

    info!("Audit session {} created for profile {business_profile_id}", row.id);
    Ok(row)
}

pub async fn insert_file_upload(
    pool: &PgPool,
    audit_session_id: Uuid,
    upload: &StoredUpload,
) -> Result<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO audit_file_uploads
            (audit_session_id, file_name, file_path, file_size, mime_type)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(audit_session_id)
    .bind(&upload.file_name)
    .bind(&upload.file_path)
    .bind(upload.size)
    .bind(&upload.mime_type)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Failed to register upload {}", upload.file_name))?;

    Ok(id)
}

/// Looks a session up by id and token. A wrong token is indistinguishable from a missing session.
pub async fn find_session(
    pool: &PgPool,
    audit_session_id: Uuid,
    session_token: Uuid,
) -> Result<Option<(AuditSessionRow, BusinessProfileRow)>> {
    let session = sqlx::query_as::<_, AuditSessionRow>(
        "SELECT * FROM audit_sessions WHERE id = $1 AND session_token = $2",
    )
    .bind(audit_session_id)
    .bind(session_token)
    .fetch_optional(pool)
    .await?;

    let Some(session) = session else {
        return Ok(None);
    };

    let profile = sqlx::query_as::<_, BusinessProfileRow>(
        "SELECT * FROM business_profiles WHERE id = $1",
    )
    .bind(session.business_profile_id)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Business profile missing for session {audit_session_id}"))?;

    Ok(Some((session, profile)))
}

/// Moves the session to `processing` unless it is already processing or completed.
const CLAIM_SESSION_SQL: &str =
    "UPDATE audit_sessions SET status = $2 WHERE id = $1 AND status NOT IN ($2, $3)";

/// `false` when another request holds the session or it has already completed.
pub async fn claim_session(pool: &PgPool, audit_session_id: Uuid) -> Result<bool> {
    let claimed = sqlx::query(CLAIM_SESSION_SQL)
        .bind(audit_session_id)
        .bind(SessionStatus::Processing.as_str())
        .bind(SessionStatus::Completed.as_str())
        .execute(pool)
        .await?
        .rows_affected();
    Ok(claimed == 1)
}

pub async fn list_session_files(pool: &PgPool, audit_session_id: Uuid) -> Result<Vec<AuditFileRow>> {
    Ok(sqlx::query_as::<_, AuditFileRow>(
        "SELECT * FROM audit_file_uploads WHERE audit_session_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(audit_session_id)
    .fetch_all(pool)
    .await?)
}

/// Writes final results to the session, then per-file analysis.
/// A failed per-file update is logged and skipped.
pub async fn save_audit_results(
    pool: &PgPool,
    audit_session_id: Uuid,
    results: &AuditResults,
    files: &[AuditFile],
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE audit_sessions SET
            status = $2,
            compliance_score = $3,
            audit_results = $4,
            recommendations = $5,
            missing_policies = $6,
            outdated_documents = $7,
            completed_checks = $8,
            processed_files = $9,
            completed_at = now()
        WHERE id = $1
        "#,
    )
    .bind(audit_session_id)
    .bind(SessionStatus::Completed.as_str())
    .bind(results.compliance_score as i32)
    .bind(serde_json::to_value(results)?)
    .bind(serde_json::to_value(&results.recommendations)?)
    .bind(serde_json::to_value(&results.missing_policies)?)
    .bind(serde_json::to_value(&results.outdated_documents)?)
    .bind(serde_json::to_value(&results.completed_checks)?)
    .bind(files.len() as i32)
    .execute(pool)
    .await
    .context("Failed to update audit session")?;

    for file in files {
        if let Err(e) = save_file_analysis(pool, file).await {
            error!("Failed to update file analysis for {}: {e:#}", file.file_name);
        }
    }

    info!("Audit results saved for session {audit_session_id}");
    Ok(())
}

async fn save_file_analysis(pool: &PgPool, file: &AuditFile) -> Result<()> {
    let analysis = file
        .analysis_results
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    sqlx::query(
        r#"
        UPDATE audit_file_uploads SET
            analysis_status = 'completed',
            analysis_results = $2,
            document_type_detected = $3,
            quality_score = $4
        WHERE id = $1
        "#,
    )
    .bind(file.id)
    .bind(analysis)
    .bind(&file.document_type_detected)
    .bind(file.quality_score.map(|q| q as i32))
    .execute(pool)
    .await?;
    Ok(())
}

pub fn failure_metadata(error: &str) -> Value {
    json!({ "error": error, "failedAt": Utc::now().to_rfc3339() })
}

/// Failure details are merged into the existing metadata.
const MARK_FAILED_SQL: &str = "UPDATE audit_sessions SET status = $2, \
    metadata = COALESCE(metadata, '{}'::jsonb) || $3::jsonb WHERE id = $1";

pub async fn mark_session_failed(pool: &PgPool, audit_session_id: Uuid, error: &str) -> Result<()> {
    sqlx::query(MARK_FAILED_SQL)
        .bind(audit_session_id)
        .bind(SessionStatus::Failed.as_str())
        .bind(failure_metadata(error))
        .execute(pool)
        .await?;
    Ok(())
}
