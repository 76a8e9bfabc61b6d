//! Document excerpts: text pulled from stored uploads to ground the analysis prompt.
//!
//! Uploads are written to S3 / MinIO by the upload collaborator; this module only reads.
//! Every failure here is soft: the classifier proceeds without an excerpt.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;

pub const MAX_EXCERPT_CHARS: usize = 6000;

/// Read-only access to uploaded document bytes, keyed by `AuditFile::file_path`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch(&self, key: &str) -> Result<Bytes>;
}

pub struct S3DocumentStore {
    client: S3Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn fetch(&self, key: &str) -> Result<Bytes> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("Failed to fetch s3://{}/{key}", self.bucket))?;

        let body = object
            .body
            .collect()
            .await
            .with_context(|| format!("Failed to read body of s3://{}/{key}", self.bucket))?;

        Ok(body.into_bytes())
    }
}

/// Extracts readable text from `bytes` according to `mime_type`.
///
/// PDFs go through pdf-extract on a blocking thread; text and markdown are read as
/// UTF-8. Other types yield `Ok(None)`. The result is truncated to
/// `MAX_EXCERPT_CHARS`.
pub async fn extract_excerpt(bytes: Bytes, mime_type: &str, file_name: &str) -> Result<Option<String>> {
    let lower_name = file_name.to_lowercase();
    let text = if mime_type == "application/pdf" || lower_name.ends_with(".pdf") {
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .context("PDF extraction task panicked")?
            .context("PDF text extraction failed")?
    } else if mime_type.starts_with("text/")
        || lower_name.ends_with(".md")
        || lower_name.ends_with(".txt")
    {
        String::from_utf8_lossy(&bytes).into_owned()
    } else {
        return Ok(None);
    };

    Ok(truncate_excerpt(&text))
}

/// Collapses whitespace runs and truncates on a char boundary. Blank text yields `None`.
pub fn truncate_excerpt(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.chars().take(MAX_EXCERPT_CHARS).collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) struct MemoryStore(pub HashMap<String, Bytes>);

    #[async_trait]
    impl DocumentStore for MemoryStore {
        async fn fetch(&self, key: &str) -> Result<Bytes> {
            self.0
                .get(key)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no object at {key}"))
        }
    }

    #[tokio::test]
    async fn test_plain_text_excerpt() {
        let bytes = Bytes::from_static(b"Privacy Policy\n\n  Reviewed   March 2024.");
        let excerpt = extract_excerpt(bytes, "text/plain", "privacy.txt").await.unwrap();
        assert_eq!(excerpt.as_deref(), Some("Privacy Policy Reviewed March 2024."));
    }

    #[tokio::test]
    async fn test_unsupported_type_has_no_excerpt() {
        let bytes = Bytes::from_static(b"PK\x03\x04");
        let excerpt = extract_excerpt(bytes, "application/zip", "bundle.zip").await.unwrap();
        assert!(excerpt.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_an_error() {
        let bytes = Bytes::from_static(b"definitely not a pdf");
        assert!(extract_excerpt(bytes, "application/pdf", "whs.pdf").await.is_err());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long = "é".repeat(MAX_EXCERPT_CHARS + 10);
        let excerpt = truncate_excerpt(&long).unwrap();
        assert_eq!(excerpt.chars().count(), MAX_EXCERPT_CHARS);
    }

    #[test]
    fn test_blank_text_has_no_excerpt() {
        assert!(truncate_excerpt(" \n\t ").is_none());
    }
}
