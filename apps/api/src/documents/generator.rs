//! AI-written documents for types the catalog has no template for.

use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::documents::placeholders::TemplateData;
use crate::documents::prompts::{GENERATION_PROMPT_TEMPLATE, WRITER_SYSTEM_TEMPLATE};
use crate::llm_client::prompts::JURISDICTION_CONTEXT;
use crate::llm_client::{InferenceBackend, InferenceRequest, LlmError};

pub const MIN_GENERATED_CHARS: usize = 500;
const GENERATION_MAX_TOKENS: u32 = 3000;
const GENERATION_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Generated content is too short ({0} characters)")]
    TooShort(usize),
}

pub struct DocumentGenerator<'a> {
    llm: &'a dyn InferenceBackend,
}

impl<'a> DocumentGenerator<'a> {
    pub fn new(llm: &'a dyn InferenceBackend) -> Self {
        Self { llm }
    }

    /// Markdown prose for `document_type`, trimmed.
    pub async fn generate(
        &self,
        document_type: &str,
        industry: &str,
        data: &TemplateData,
    ) -> Result<String, GenerationError> {
        let request = InferenceRequest::new(generation_prompt(document_type, industry, data))
            .system(WRITER_SYSTEM_TEMPLATE.replace("{jurisdiction}", JURISDICTION_CONTEXT))
            .max_tokens(GENERATION_MAX_TOKENS)
            .temperature(GENERATION_TEMPERATURE)
            .metadata(json!({
                "documentType": document_type,
                "industry": industry,
                "purpose": "document_generation",
            }));

        let output = self.llm.submit(request).await?;
        let content = output.text.trim();
        let length = content.chars().count();
        if length < MIN_GENERATED_CHARS {
            return Err(GenerationError::TooShort(length));
        }

        info!(
            request_id = %output.request_id,
            model = %output.model,
            total_tokens = output.usage.total_tokens,
            "Generated {document_type} for {industry}: {length} characters in {}ms",
            output.processing_time.as_millis()
        );
        Ok(content.to_string())
    }
}

pub fn generation_prompt(document_type: &str, industry: &str, data: &TemplateData) -> String {
    let details: Vec<String> = [
        ("Business Name", &data.business_name),
        ("ABN", &data.abn),
        ("Address", &data.address),
        ("Email", &data.contact_email),
        ("Phone", &data.contact_phone),
        ("Website", &data.website),
        ("Additional Information", &data.additional_info),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| format!("- {label}: {v}"))
    })
    .collect();

    GENERATION_PROMPT_TEMPLATE
        .replace("{document_type}", document_type)
        .replace("{industry}", industry)
        .replace("{business_details}", &details.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::scripted::ScriptedBackend;

    fn data() -> TemplateData {
        TemplateData {
            business_name: Some("Harbour Cafe".to_string()),
            abn: Some("  ".to_string()),
            contact_email: Some("hello@harbour.example".to_string()),
            ..Default::default()
        }
    }

    fn long_document() -> String {
        format!("## Purpose\n{}", "Food safety is everyone's job. ".repeat(20))
    }

    #[test]
    fn test_prompt_lists_supplied_details_only() {
        let prompt = generation_prompt("Food Safety Plan", "hospitality", &data());
        assert!(prompt.starts_with("Generate a Food Safety Plan for a hospitality business."));
        assert!(prompt.contains("- Business Name: Harbour Cafe\n- Email: hello@harbour.example"));
        assert!(!prompt.contains("ABN"));
        assert!(!prompt.contains('{'));
        assert!(prompt.contains(r###"a line of the form "## Section Title""###));
        assert!(prompt.ends_with("or any commentary outside the document"));
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_content() {
        let backend = ScriptedBackend::new(vec![Ok(format!("\n\n{}\n", long_document()))]);
        let content = DocumentGenerator::new(&backend)
            .generate("Food Safety Plan", "hospitality", &data())
            .await
            .unwrap();
        assert_eq!(content, long_document().trim());

        let requests = backend.requests();
        assert_eq!(requests[0].max_tokens, Some(3000));
        assert_eq!(requests[0].temperature, Some(0.7));
        assert!(requests[0].system_prompt.as_deref().unwrap().contains("Australian compliance"));
        assert_eq!(requests[0].metadata.as_ref().unwrap()["purpose"], "document_generation");
    }

    #[tokio::test]
    async fn test_short_content_is_rejected() {
        let backend = ScriptedBackend::new(vec![Ok("## Purpose\nToo brief.".to_string())]);
        let err = DocumentGenerator::new(&backend)
            .generate("Food Safety Plan", "hospitality", &data())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::TooShort(21)));
    }

    #[tokio::test]
    async fn test_inference_failure_propagates() {
        let backend = ScriptedBackend::failing();
        let err = DocumentGenerator::new(&backend)
            .generate("Food Safety Plan", "hospitality", &data())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Llm(LlmError::TransientService { .. })));
    }
}
