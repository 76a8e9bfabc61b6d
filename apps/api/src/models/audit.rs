use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::audit::models::{AuditFile, BusinessProfile};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BusinessProfileRow {
    pub id: Uuid,
    pub business_name: String,
    pub industry: String,
    pub sub_industry: Option<String>,
    pub city: String,
    pub region: Option<String>,
    pub org_size: Option<String>,
    pub abn: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<BusinessProfileRow> for BusinessProfile {
    fn from(row: BusinessProfileRow) -> Self {
        BusinessProfile {
            business_name: row.business_name,
            industry: row.industry,
            sub_industry: row.sub_industry,
            city: row.city,
            region: row.region,
            org_size: row.org_size,
            abn: row.abn,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BenchmarkRow {
    pub id: Uuid,
    pub industry: String,
    pub sub_industry: Option<String>,
    pub required_policies: Option<Value>,
    pub scoring_criteria: Option<Value>,
    pub metadata: Option<Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditSessionRow {
    pub id: Uuid,
    pub business_profile_id: Uuid,
    pub session_token: Uuid,
    pub status: String,
    pub compliance_score: Option<i32>,
    pub audit_results: Option<Value>,
    pub recommendations: Option<Value>,
    pub missing_policies: Option<Value>,
    pub outdated_documents: Option<Value>,
    pub completed_checks: Option<Value>,
    pub total_files: i32,
    pub processed_files: i32,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditFileRow {
    pub id: Uuid,
    pub audit_session_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub analysis_status: String,
    pub analysis_results: Option<Value>,
    pub document_type_detected: Option<String>,
    pub quality_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditFileRow> for AuditFile {
    /// Rows enter the pipeline unanalysed; stored analysis is ignored on re-runs.
    fn from(row: AuditFileRow) -> Self {
        AuditFile {
            id: row.id,
            file_name: row.file_name,
            file_path: row.file_path,
            size: row.file_size,
            mime_type: row.mime_type,
            analysis_results: None,
            document_type_detected: None,
            quality_score: None,
        }
    }
}
