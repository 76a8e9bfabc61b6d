//! Document Classifier: one AI-assisted analysis per uploaded file.
//!
//! Files are analysed sequentially in submission order. A failed or
//! unparseable inference call produces a sentinel result for that file only;
//! the batch always completes.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::audit::excerpt::{extract_excerpt, DocumentStore};
use crate::audit::models::{
    AnalysisResult, AuditFile, BusinessProfile, ComplianceLevel, CurrencyStatus, UNKNOWN_DOCUMENT,
};
use crate::audit::prompts::{
    ANALYSIS_PROMPT_TEMPLATE, AUDITOR_SYSTEM_TEMPLATE, EXCERPT_SECTION_TEMPLATE,
};
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, JURISDICTION_CONTEXT};
use crate::llm_client::{extract_json_object, InferenceBackend, InferenceRequest};

const ANALYSIS_MAX_TOKENS: u32 = 2000;
/// Scoring favours repeatable answers over varied prose.
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const DEFAULT_QUALITY_SCORE: f64 = 50.0;

pub struct DocumentClassifier<'a> {
    llm: &'a dyn InferenceBackend,
    documents: Option<&'a dyn DocumentStore>,
}

impl<'a> DocumentClassifier<'a> {
    pub fn new(llm: &'a dyn InferenceBackend, documents: Option<&'a dyn DocumentStore>) -> Self {
        Self { llm, documents }
    }

    /// Analyses every file and returns them, in the same order, with analysis attached.
    pub async fn classify_all(&self, files: Vec<AuditFile>, profile: &BusinessProfile) -> Vec<AuditFile> {
        let total = files.len();
        let mut analysed = Vec::with_capacity(total);

        for (index, file) in files.into_iter().enumerate() {
            let analysis = self.classify(&file, profile).await;
            info!(
                file = %file.file_name,
                document_type = %analysis.document_type,
                quality_score = analysis.quality_score,
                "Analysed file {}/{total}",
                index + 1
            );
            analysed.push(file.with_analysis(analysis));
        }

        analysed
    }

    pub async fn classify(&self, file: &AuditFile, profile: &BusinessProfile) -> AnalysisResult {
        let excerpt = self.excerpt_for(file).await;
        let request = InferenceRequest::new(analysis_prompt(file, profile, excerpt.as_deref()))
            .system(auditor_system_prompt(&profile.industry))
            .max_tokens(ANALYSIS_MAX_TOKENS)
            .temperature(ANALYSIS_TEMPERATURE)
            .metadata(json!({
                "fileName": file.file_name,
                "industry": profile.industry,
                "purpose": "document_analysis",
            }));

        match self.llm.submit(request).await {
            Ok(output) => {
                debug!(
                    request_id = %output.request_id,
                    model = %output.model,
                    total_tokens = output.usage.total_tokens,
                    "Analysis reply for {}",
                    file.file_name
                );
                parse_analysis(&output.text)
            }
            Err(e) => {
                warn!(file = %file.file_name, "Document analysis failed: {e}");
                AnalysisResult::call_failed(e.to_string())
            }
        }
    }

    async fn excerpt_for(&self, file: &AuditFile) -> Option<String> {
        let store = self.documents?;
        let bytes = match store.fetch(&file.file_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(file = %file.file_name, "Could not fetch stored upload: {e:#}");
                return None;
            }
        };

        match extract_excerpt(bytes, &file.mime_type, &file.file_name).await {
            Ok(excerpt) => excerpt,
            Err(e) => {
                warn!(file = %file.file_name, "Could not extract document text: {e:#}");
                None
            }
        }
    }
}

pub fn auditor_system_prompt(industry: &str) -> String {
    AUDITOR_SYSTEM_TEMPLATE
        .replace("{industry}", industry)
        .replace("{jurisdiction}", JURISDICTION_CONTEXT)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

pub fn analysis_prompt(file: &AuditFile, profile: &BusinessProfile, excerpt: Option<&str>) -> String {
    let sub_industry_line = profile
        .sub_industry
        .as_deref()
        .map(|s| format!("Sub-industry: {s}"))
        .unwrap_or_default();
    let excerpt_section = excerpt
        .map(|e| EXCERPT_SECTION_TEMPLATE.replace("{excerpt}", e))
        .unwrap_or_default();

    ANALYSIS_PROMPT_TEMPLATE
        .replace("{file_name}", &file.file_name)
        .replace("{business_name}", &profile.business_name)
        .replace("{industry}", &profile.industry)
        .replace("{sub_industry_line}", &sub_industry_line)
        .replace("{excerpt_section}", &excerpt_section)
}

/// Reply shape as the model tends to write it. Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    document_type: Option<String>,
    quality_score: Option<Value>,
    compliance_level: Option<String>,
    currency_status: Option<String>,
    issues: Option<Vec<String>>,
    strengths: Option<Vec<String>>,
    recommendations: Option<Vec<String>>,
}

/// Turns a model reply into an `AnalysisResult`, or the unparseable sentinel.
pub fn parse_analysis(reply: &str) -> AnalysisResult {
    let Some(fragment) = extract_json_object(reply) else {
        warn!("Analysis reply contained no JSON object");
        return AnalysisResult::unparseable("Unable to parse detailed analysis", reply);
    };

    let raw: RawAnalysis = match serde_json::from_str(fragment) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Analysis reply JSON did not parse: {e}");
            return AnalysisResult::unparseable("Analysis parsing failed", reply);
        }
    };

    let document_type = raw
        .document_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_DOCUMENT.to_string());

    AnalysisResult {
        document_type,
        quality_score: quality_from_reply(raw.quality_score.as_ref()),
        compliance_level: ComplianceLevel::from_reply(raw.compliance_level.as_deref()),
        currency_status: CurrencyStatus::from_reply(raw.currency_status.as_deref()),
        issues: raw.issues.unwrap_or_default(),
        strengths: raw.strengths.unwrap_or_default(),
        recommendations: raw.recommendations.unwrap_or_default(),
        error: None,
        raw_analysis: None,
    }
}

/// Accepts numbers or numeric strings; anything else scores 50. Clamped to 0..=100.
fn quality_from_reply(value: Option<&Value>) -> u32 {
    let score = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .map(f64::round)
    .filter(|s| s.is_finite() && *s != 0.0)
    .unwrap_or(DEFAULT_QUALITY_SCORE);

    // A zero score means the model gave no usable rating.
    score.clamp(0.0, 100.0) as u32
}
