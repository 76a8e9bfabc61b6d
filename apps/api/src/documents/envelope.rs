//! Output formats and the envelopes assembled documents are wrapped in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    /// The pdf artifact is print-ready HTML; binary conversion happens downstream.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "text/html",
            DocumentFormat::Docx => DOCX_MIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(rename = "type")]
    pub format: DocumentFormat,
    pub content: String,
    pub filename: String,
    pub mime_type: String,
}

/// Header text shown on the styled envelope.
#[derive(Debug, Clone)]
pub struct Letterhead<'a> {
    pub business_name: &'a str,
    pub document_title: &'a str,
    pub date: NaiveDate,
}

/// Replaces every character that is not ASCII alphanumeric with `_`.
pub fn filename_part(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn artifact_filename(business_name: &str, document_id: &str, format: DocumentFormat) -> String {
    format!(
        "{}_{}.{}",
        filename_part(business_name),
        filename_part(document_id),
        format.extension()
    )
}

/// Wraps an assembled body for `format`.
pub fn build_artifact(
    format: DocumentFormat,
    body: &str,
    letterhead: &Letterhead<'_>,
    document_id: &str,
) -> Artifact {
    let content = match format {
        DocumentFormat::Pdf => styled_html(body, letterhead),
        DocumentFormat::Docx => body.to_string(),
    };

    Artifact {
        format,
        content,
        filename: artifact_filename(letterhead.business_name, document_id, format),
        mime_type: format.mime_type().to_string(),
    }
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn styled_html(body: &str, letterhead: &Letterhead<'_>) -> String {
    let business = escape_html(letterhead.business_name);
    let title = escape_html(letterhead.document_title);
    let date = letterhead.date.format("%d/%m/%Y");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {business}</title>
    <style>
        body {{ font-family: 'Segoe UI', sans-serif; line-height: 1.6; color: #333; margin: 2cm; }}
        .header {{ text-align: center; border-bottom: 3px solid #2563eb; padding-bottom: 20px; margin-bottom: 30px; }}
        .business-name {{ font-size: 28px; font-weight: bold; color: #2563eb; margin-bottom: 8px; }}
        .document-title {{ font-size: 24px; font-weight: bold; color: #1f2937; }}
        h2 {{ color: #2563eb; margin-top: 25px; margin-bottom: 15px; }}
        .footer {{ margin-top: 40px; padding-top: 20px; border-top: 1px solid #e5e7eb; text-align: center; font-size: 12px; color: #6b7280; }}
    </style>
</head>
<body>
    <div class="header">
        <div class="business-name">{business}</div>
        <div class="document-title">{title}</div>
    </div>
    <div class="content">{body}</div>
    <div class="footer">
        <p>Generated by {business} | {date}</p>
    </div>
</body>
</html>"#
    )
}
