//! Audit pipeline: classify → resolve benchmark → score → augment → persist.

use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::audit::benchmark::BenchmarkResolver;
use crate::audit::classifier::DocumentClassifier;
use crate::audit::excerpt::DocumentStore;
use crate::audit::models::{AuditFile, AuditResults, BusinessProfile, SessionStatus};
use crate::audit::recommendations::generate_industry_recommendations;
use crate::audit::repository::{
    claim_session, find_session, list_session_files, mark_session_failed, save_audit_results,
};
use crate::audit::scoring::calculate_compliance_score;
use crate::errors::AppError;
use crate::llm_client::InferenceBackend;
use crate::models::audit::AuditSessionRow;

const ALREADY_PROCESSING: &str = "Audit session is already being processed";

pub struct AuditPipeline<'a> {
    llm: &'a dyn InferenceBackend,
    documents: Option<&'a dyn DocumentStore>,
    benchmarks: &'a BenchmarkResolver,
}

#[derive(Debug)]
pub struct AuditOutcome {
    pub files: Vec<AuditFile>,
    pub results: AuditResults,
}

pub enum SessionOutcome {
    AlreadyCompleted(AuditSessionRow),
    Completed { session_id: Uuid, results: AuditResults },
}

impl<'a> AuditPipeline<'a> {
    pub fn new(
        llm: &'a dyn InferenceBackend,
        documents: Option<&'a dyn DocumentStore>,
        benchmarks: &'a BenchmarkResolver,
    ) -> Self {
        Self {
            llm,
            documents,
            benchmarks,
        }
    }

    /// Runs the in-memory part of an audit. Never fails: per-file and benchmark
    /// problems degrade into sentinels and fallbacks.
    pub async fn run(&self, profile: &BusinessProfile, files: Vec<AuditFile>) -> AuditOutcome {
        info!(
            "Starting analysis of {} files for {}",
            files.len(),
            profile.business_name
        );

        let benchmark = self
            .benchmarks
            .resolve(&profile.industry, profile.sub_industry.as_deref())
            .await;

        let files = DocumentClassifier::new(self.llm, self.documents)
            .classify_all(files, profile)
            .await;

        let mut results = calculate_compliance_score(&files, &benchmark, profile);
        results.recommendations =
            generate_industry_recommendations(&profile.industry, &results, profile);

        AuditOutcome { files, results }
    }

    /// Processes a stored session end to end. Any failure after the session is
    /// found marks it `failed` before the error is returned.
    pub async fn process_session(
        &self,
        pool: &PgPool,
        audit_session_id: Uuid,
        session_token: Uuid,
    ) -> Result<SessionOutcome, AppError> {
        let (session, profile_row) = find_session(pool, audit_session_id, session_token)
            .await?
            .ok_or_else(|| AppError::NotFound("Audit session not found or invalid token".to_string()))?;

        if session.status == SessionStatus::Completed.as_str() {
            return Ok(SessionOutcome::AlreadyCompleted(session));
        }
        ensure_not_processing(&session.status)?;
        if !claim_session(pool, audit_session_id).await? {
            return Err(AppError::Conflict(ALREADY_PROCESSING.to_string()));
        }

        let profile = BusinessProfile::from(profile_row);
        match self.process_stored(pool, audit_session_id, &profile).await {
            Ok(results) => {
                info!(
                    "Audit completed for session {audit_session_id}: {}% compliance",
                    results.compliance_score
                );
                Ok(SessionOutcome::Completed {
                    session_id: audit_session_id,
                    results,
                })
            }
            Err(e) => {
                error!("Audit processing failed for session {audit_session_id}: {e:#}");
                if let Err(mark_err) = mark_session_failed(pool, audit_session_id, &e.to_string()).await {
                    error!("Could not mark session {audit_session_id} failed: {mark_err:#}");
                }
                Err(AppError::Internal(e))
            }
        }
    }

    async fn process_stored(
        &self,
        pool: &PgPool,
        audit_session_id: Uuid,
        profile: &BusinessProfile,
    ) -> anyhow::Result<AuditResults> {
        let files: Vec<AuditFile> = list_session_files(pool, audit_session_id)
            .await?
            .into_iter()
            .map(AuditFile::from)
            .collect();
        if files.is_empty() {
            return Err(anyhow!("No uploaded files found for audit session"));
        }

        let outcome = self.run(profile, files).await;
        save_audit_results(pool, audit_session_id, &outcome.results, &outcome.files).await?;
        Ok(outcome.results)
    }
}

fn ensure_not_processing(status: &str) -> Result<(), AppError> {
    if status == SessionStatus::Processing.as_str() {
        return Err(AppError::Conflict(ALREADY_PROCESSING.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::benchmark::tests::StubStore;
    use crate::audit::models::{DetailedAnalysis, ANALYSIS_FAILED};
    use crate::audit::recommendations::MAX_RECOMMENDATIONS;
    use crate::llm_client::scripted::ScriptedBackend;
    use std::sync::Arc;

    fn profile() -> BusinessProfile {
        BusinessProfile {
            business_name: "Bright Futures Support".to_string(),
            industry: "ndis".to_string(),
            sub_industry: None,
            city: "Geelong".to_string(),
            region: Some("Victoria".to_string()),
            org_size: Some("Small (1-50 employees)".to_string()),
            abn: None,
        }
    }

    fn upload(name: &str) -> AuditFile {
        AuditFile {
            id: Uuid::new_v4(),
            file_name: name.to_string(),
            file_path: format!("audit_uploads/s1/{name}"),
            size: 4096,
            mime_type: "application/pdf".to_string(),
            analysis_results: None,
            document_type_detected: None,
            quality_score: None,
        }
    }

    #[tokio::test]
    async fn test_total_outage_still_produces_results() {
        let backend = ScriptedBackend::failing();
        let resolver = BenchmarkResolver::new(Arc::new(StubStore::unavailable()));
        let pipeline = AuditPipeline::new(&backend, None, &resolver);

        let outcome = pipeline
            .run(&profile(), vec![upload("privacy.pdf"), upload("whs.pdf")])
            .await;

        assert!(outcome
            .files
            .iter()
            .all(|f| f.document_type_detected.as_deref() == Some(ANALYSIS_FAILED)));
        assert_eq!(outcome.results.detailed_analysis, DetailedAnalysis::default());
        assert_eq!(outcome.results.compliance_score, 0);
        assert_eq!(outcome.results.missing_policies.len(), 8);
        assert!(outcome.results.completed_checks.is_empty());
        assert_eq!(outcome.results.recommendations.len(), MAX_RECOMMENDATIONS);
        assert_eq!(
            outcome.results.recommendations.last().map(String::as_str),
            Some("Ensure all policies comply with Victoria state-specific regulations")
        );
    }

    #[tokio::test]
    async fn test_detected_policies_complete_checks() {
        let backend = ScriptedBackend::new(vec![
            Ok(r#"{"documentType": "Privacy Policy", "qualityScore": 90, "complianceLevel": "high", "currencyStatus": "current"}"#.to_string()),
            Ok(r#"{"documentType": "Code of Conduct", "qualityScore": 70, "complianceLevel": "medium", "currencyStatus": "outdated"}"#.to_string()),
        ]);
        let resolver = BenchmarkResolver::new(Arc::new(StubStore::returning(None)));
        let pipeline = AuditPipeline::new(&backend, None, &resolver);

        let outcome = pipeline
            .run(&profile(), vec![upload("privacy.pdf"), upload("conduct.pdf")])
            .await;

        assert_eq!(outcome.results.completed_checks, vec!["Privacy Policy", "Code of Conduct"]);
        assert_eq!(outcome.results.missing_policies.len(), 6);
        assert_eq!(outcome.results.detailed_analysis.content_quality_score, 80);
        assert_eq!(outcome.results.detailed_analysis.compliance_alignment_score, 50);
        assert_eq!(outcome.results.outdated_documents.len(), 1);
        assert_eq!(outcome.results.outdated_documents[0].file_name, "conduct.pdf");
    }

    #[test]
    fn test_processing_session_is_a_conflict() {
        let err = ensure_not_processing("processing").unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref msg) if msg == ALREADY_PROCESSING));
        assert!(ensure_not_processing("pending").is_ok());
        assert!(ensure_not_processing("failed").is_ok());
    }
}
