use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Document type recorded when the inference call itself failed.
pub const ANALYSIS_FAILED: &str = "Analysis Failed";
/// Document type recorded when the reply could not be parsed.
pub const UNKNOWN_DOCUMENT: &str = "Unknown Document";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub business_name: String,
    pub industry: String,
    pub sub_industry: Option<String>,
    pub city: String,
    pub region: Option<String>,
    pub org_size: Option<String>,
    pub abn: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    High,
    Medium,
    Low,
}

impl ComplianceLevel {
    /// Lenient parse of whatever the model wrote. Unknown values count as medium.
    pub fn from_reply(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("high") => ComplianceLevel::High,
            Some("low") => ComplianceLevel::Low,
            _ => ComplianceLevel::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyStatus {
    Current,
    Outdated,
    Unknown,
}

impl CurrencyStatus {
    pub fn from_reply(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("current") => CurrencyStatus::Current,
            Some("outdated") => CurrencyStatus::Outdated,
            _ => CurrencyStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Processing => "processing",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
        }
    }
}

/// Structured assessment of one uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub document_type: String,
    /// 0 – 100
    pub quality_score: u32,
    pub compliance_level: ComplianceLevel,
    pub currency_status: CurrencyStatus,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Set only on the call-failure sentinel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Raw model reply, kept when it could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_analysis: Option<String>,
}

impl AnalysisResult {
    /// Sentinel for a file whose inference call failed outright.
    pub fn call_failed(error: impl Into<String>) -> Self {
        Self {
            document_type: ANALYSIS_FAILED.to_string(),
            quality_score: 0,
            compliance_level: ComplianceLevel::Low,
            currency_status: CurrencyStatus::Unknown,
            issues: vec![],
            strengths: vec![],
            recommendations: vec![],
            error: Some(error.into()),
            raw_analysis: None,
        }
    }

    /// Sentinel for a reply that arrived but could not be parsed.
    pub fn unparseable(reason: &str, raw_reply: &str) -> Self {
        Self {
            document_type: UNKNOWN_DOCUMENT.to_string(),
            quality_score: 50,
            compliance_level: ComplianceLevel::Medium,
            currency_status: CurrencyStatus::Unknown,
            issues: vec![reason.to_string()],
            strengths: vec![],
            recommendations: vec!["Manual review recommended".to_string()],
            error: None,
            raw_analysis: Some(raw_reply.to_string()),
        }
    }
}

/// An uploaded file, optionally carrying its analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditFile {
    pub id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub size: i64,
    pub mime_type: String,
    pub analysis_results: Option<AnalysisResult>,
    pub document_type_detected: Option<String>,
    pub quality_score: Option<u32>,
}

impl AuditFile {
    /// Attaches the analysis. The classifier calls this exactly once per file.
    pub fn with_analysis(self, analysis: AnalysisResult) -> Self {
        Self {
            document_type_detected: Some(analysis.document_type.clone()),
            quality_score: Some(analysis.quality_score),
            analysis_results: Some(analysis),
            ..self
        }
    }

    pub fn compliance_level(&self) -> Option<ComplianceLevel> {
        self.analysis_results.as_ref().map(|a| a.compliance_level)
    }

    pub fn currency_status(&self) -> Option<CurrencyStatus> {
        self.analysis_results.as_ref().map(|a| a.currency_status)
    }
}

/// Stored benchmarks use snake_case keys; API payloads use camelCase. Both are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringCriteria {
    #[serde(alias = "policy_presence_weight")]
    pub policy_presence_weight: f64,
    #[serde(alias = "content_quality_weight")]
    pub content_quality_weight: f64,
    #[serde(alias = "compliance_alignment_weight")]
    pub compliance_alignment_weight: f64,
    #[serde(alias = "document_currency_weight")]
    pub document_currency_weight: f64,
    #[serde(alias = "minimum_passing_score", deserialize_with = "whole_score")]
    pub minimum_passing_score: u32,
}

/// Accepts integer or fractional scores, rounded and clamped to 0-100.
fn whole_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round().clamp(0.0, 100.0) as u32)
}

impl Default for ScoringCriteria {
    fn default() -> Self {
        Self {
            policy_presence_weight: 40.0,
            content_quality_weight: 30.0,
            compliance_alignment_weight: 20.0,
            document_currency_weight: 10.0,
            minimum_passing_score: 70,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceBenchmark {
    pub id: String,
    pub industry: String,
    pub sub_industry: Option<String>,
    pub required_policies: Vec<String>,
    pub scoring_criteria: ScoringCriteria,
    pub metadata: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutdatedDocument {
    pub file_name: String,
    pub issue: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    pub policy_presence_score: u32,
    pub content_quality_score: u32,
    pub compliance_alignment_score: u32,
    pub document_currency_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditResults {
    pub compliance_score: u32,
    pub missing_policies: Vec<String>,
    pub outdated_documents: Vec<OutdatedDocument>,
    pub completed_checks: Vec<String>,
    pub recommendations: Vec<String>,
    pub detailed_analysis: DetailedAnalysis,
}
