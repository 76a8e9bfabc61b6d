//! Template Engine: turns catalog templates into business-specific artifacts.
//!
//! Rendering never fails. A missing or unreadable template falls through
//! industry → `_generic` → a synthesised placeholder block.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::cache::CatalogCache;
use crate::catalog::resolver::{find_document, find_pack, template_path};
use crate::documents::envelope::{build_artifact, Artifact, DocumentFormat, Letterhead};
use crate::documents::markup::MarkupPipeline;
use crate::documents::placeholders::{capitalize, substitute, TemplateData};
use crate::documents::source::{TemplateSource, TemplateSourceError};

pub const GENERIC_INDUSTRY: &str = "_generic";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBlock {
    pub title: String,
    pub content: String,
    pub order: usize,
}

/// One catalog document rendered as part of a pack.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub document_id: String,
    pub title: String,
    pub artifacts: Vec<Artifact>,
}

pub struct TemplateEngine {
    source: Box<dyn TemplateSource>,
    markup: MarkupPipeline,
}

impl TemplateEngine {
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        let markup = MarkupPipeline::standard();
        debug!("Markup stages: {:?}", markup.stage_names());
        Self {
            source: Box::new(source),
            markup,
        }
    }

    /// Blocks for `document_id`, from the first source in the lookup chain that has them.
    pub fn load_blocks(&self, industry: &str, document_id: &str) -> Vec<TemplateBlock> {
        for owner in [industry, GENERIC_INDUSTRY] {
            let path = template_path(owner, document_id);
            match self.source.load(&path) {
                Ok(text) => {
                    let blocks = parse_template(&text, &path);
                    if !blocks.is_empty() {
                        debug!("Loaded {} blocks from {path}", blocks.len());
                        return blocks;
                    }
                    warn!("Template {path} has no sections, trying next source");
                }
                Err(TemplateSourceError::Missing(_)) => {
                    debug!("No template at {path}");
                }
                Err(e) => warn!("{e}"),
            }
        }

        info!("Using placeholder content for {industry}/{document_id}");
        vec![placeholder_block(industry, document_id)]
    }

    /// `<h2>{title}</h2>{html}` per block in order, separated by a blank line.
    /// Markup is rendered over the template text before values are filled in,
    /// so business values never pick up formatting.
    pub fn assemble(&self, blocks: &[TemplateBlock], data: &TemplateData, today: NaiveDate) -> String {
        let mut ordered: Vec<&TemplateBlock> = blocks.iter().collect();
        ordered.sort_by_key(|b| b.order);

        ordered
            .into_iter()
            .map(|block| {
                let title = substitute(&block.title, data, today);
                let body = substitute(&self.markup.render(&block.content), data, today);
                format!("<h2>{title}</h2>{body}")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn render(
        &self,
        industry: &str,
        document_id: &str,
        data: &TemplateData,
        formats: &[DocumentFormat],
    ) -> Vec<Artifact> {
        let blocks = self.load_blocks(industry, document_id);
        let title = document_title(industry, document_id, data);
        self.package(&blocks, document_id, &title, data, formats, Local::now().date_naive())
    }

    /// Renders markdown that did not come from a template file, such as
    /// generated prose, through the same path as catalog templates.
    pub fn render_markdown(
        &self,
        markdown: &str,
        document_id: &str,
        title: &str,
        data: &TemplateData,
        formats: &[DocumentFormat],
    ) -> Vec<Artifact> {
        let blocks = if markdown.lines().any(|line| line.starts_with("## ")) {
            parse_template(markdown, document_id)
        } else {
            vec![TemplateBlock {
                title: title.to_string(),
                content: sanitize(markdown, document_id).trim().to_string(),
                order: 1,
            }]
        };
        self.package(&blocks, document_id, title, data, formats, Local::now().date_naive())
    }

    /// Every document in the pack, each in the pack's formats.
    /// `None` when the industry or pack does not exist.
    pub fn render_pack(
        &self,
        catalog: &CatalogCache,
        industry: &str,
        pack_id: &str,
        data: &TemplateData,
    ) -> Option<Vec<RenderedDocument>> {
        let pack = find_pack(industry, pack_id)?;
        let documents = catalog.pack_documents(industry, pack_id);
        info!(
            "Rendering {} documents for {industry}/{pack_id} in {} formats",
            documents.len(),
            pack.formats.len()
        );

        Some(
            documents
                .into_iter()
                .map(|doc| {
                    let data = TemplateData {
                        document_type: Some(doc.title.to_string()),
                        ..data.clone()
                    };
                    RenderedDocument {
                        document_id: doc.id.to_string(),
                        title: doc.title.to_string(),
                        artifacts: self.render(industry, doc.id, &data, pack.formats),
                    }
                })
                .collect(),
        )
    }

    fn package(
        &self,
        blocks: &[TemplateBlock],
        document_id: &str,
        title: &str,
        data: &TemplateData,
        formats: &[DocumentFormat],
        today: NaiveDate,
    ) -> Vec<Artifact> {
        let body = self.assemble(blocks, data, today);
        let business_name = data.business_name_or_placeholder();
        let letterhead = Letterhead {
            business_name: &business_name,
            document_title: title,
            date: today,
        };

        formats
            .iter()
            .map(|format| build_artifact(*format, &body, &letterhead, document_id))
            .collect()
    }
}

/// Header title: the caller's document type, else the catalog title, else one
/// derived from the id.
fn document_title(industry: &str, document_id: &str, data: &TemplateData) -> String {
    data.document_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| find_document(industry, document_id).map(|d| d.title.to_string()))
        .unwrap_or_else(|| title_from_id(document_id))
}

fn sanitize(text: &str, origin: &str) -> String {
    if text.contains('—') {
        warn!("Replacing em dashes in {origin}");
        text.replace('—', "-")
    } else {
        text.to_string()
    }
}

/// Splits template text into `## ` sections. Text before the first heading
/// becomes a section titled by its first line.
pub fn parse_template(text: &str, origin: &str) -> Vec<TemplateBlock> {
    let text = sanitize(text, origin);

    split_sections(&text)
        .into_iter()
        .filter(|section| !section.trim().is_empty())
        .enumerate()
        .map(|(index, section)| {
            let mut lines = section.lines();
            let title = lines
                .next()
                .unwrap_or_default()
                .trim_start_matches('#')
                .trim()
                .to_string();
            let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();
            TemplateBlock {
                title,
                content,
                order: index + 1,
            }
        })
        .collect()
}

/// Pieces between line-start `## ` markers, markers removed.
fn split_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        if line.starts_with("## ") {
            sections.push(&text[start..line_start]);
            start = line_start + "## ".len();
        }
        line_start += line.len();
    }
    sections.push(&text[start..]);
    sections
}

pub fn title_from_id(document_id: &str) -> String {
    document_id
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn placeholder_block(industry: &str, document_id: &str) -> TemplateBlock {
    TemplateBlock {
        title: title_from_id(document_id),
        content: format!(
            "This is a {document_id} document for {industry}.\n\n\
             Please customize this content based on your specific requirements."
        ),
        order: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::source::tests::MemorySource;
    use crate::documents::source::FsTemplateSource;

    const WHS_TEMPLATE: &str = "# Work Health and Safety Policy\n\n\
        ## Purpose\n\
        {{businessName}} is committed to a **safe** workplace.\n\n\
        ## Responsibilities\n\
        - Report hazards\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    fn acme() -> TemplateData {
        TemplateData {
            business_name: Some("Acme Builders".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_template_splits_sections() {
        let blocks = parse_template(WHS_TEMPLATE, "test");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].title, "Work Health and Safety Policy");
        assert_eq!(blocks[0].content, "");
        assert_eq!(blocks[1].title, "Purpose");
        assert_eq!(blocks[1].content, "{{businessName}} is committed to a **safe** workplace.");
        assert_eq!(blocks[2].title, "Responsibilities");
        assert_eq!(blocks[2].order, 3);
    }

    #[test]
    fn test_parse_template_drops_empty_sections_and_normalises_dashes() {
        let blocks = parse_template("## A\nfirst — second\n## \n\n## B\nbody", "test");
        let titles: Vec<_> = blocks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(blocks[1].order, 2);
        assert_eq!(blocks[0].content, "first - second");

        assert!(parse_template("\n\n", "test").is_empty());
    }

    #[test]
    fn test_heading_marker_only_at_line_start() {
        let blocks = parse_template("## Scope\nSee ## notes inline", "test");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "See ## notes inline");
    }

    #[test]
    fn test_industry_template_wins() {
        let source = MemorySource::default()
            .with("blocks/construction-trades/whs-policy.mdx", "## Industry\nbody")
            .with("blocks/_generic/whs-policy.mdx", "## Generic\nbody");
        let engine = TemplateEngine::new(source);
        assert_eq!(engine.load_blocks("construction-trades", "whs-policy")[0].title, "Industry");
    }

    #[test]
    fn test_generic_template_is_second() {
        let source = MemorySource::default().with("blocks/_generic/whs-policy.mdx", "## Generic\nbody");
        let engine = TemplateEngine::new(source);
        assert_eq!(engine.load_blocks("construction-trades", "whs-policy")[0].title, "Generic");
    }

    #[test]
    fn test_placeholder_is_last() {
        let engine = TemplateEngine::new(MemorySource::default());
        let blocks = engine.load_blocks("ndis", "incident_management-policy");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Incident Management Policy");

        let html = engine.assemble(&blocks, &TemplateData::default(), today());
        assert_eq!(
            html,
            "<h2>Incident Management Policy</h2><p>This is a incident_management-policy document for ndis.</p>\
             <p>Please customize this content based on your specific requirements.</p>"
        );
    }

    #[test]
    fn test_unreadable_template_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("blocks/ndis/code-of-conduct.mdx")).unwrap();
        std::fs::create_dir_all(dir.path().join("blocks/_generic")).unwrap();
        std::fs::write(
            dir.path().join("blocks/_generic/code-of-conduct.mdx"),
            "## Conduct\nBe respectful",
        )
        .unwrap();

        let engine = TemplateEngine::new(FsTemplateSource::new(dir.path()));
        assert_eq!(engine.load_blocks("ndis", "code-of-conduct")[0].title, "Conduct");
    }

    #[test]
    fn test_shipped_templates_parse() {
        let engine = TemplateEngine::new(FsTemplateSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates")));

        let whs = engine.load_blocks("construction-trades", "whs-policy");
        assert_eq!(whs[0].title, "Work Health and Safety Policy");
        assert_eq!(whs[1].title, "Commitment");
        assert_eq!(whs.last().map(|b| b.title.as_str()), Some("Review"));

        let privacy = engine.load_blocks("retail-ecommerce", "privacy-policy");
        assert_eq!(privacy[0].title, "Privacy Policy");
        assert_eq!(privacy[2].title, "Information We Collect");
    }

    #[test]
    fn test_assemble_orders_blocks_and_substitutes() {
        let engine = TemplateEngine::new(MemorySource::default());
        let blocks = vec![
            TemplateBlock { title: "Second".into(), content: "*later*".into(), order: 2 },
            TemplateBlock { title: "First for {{businessName}}".into(), content: "**now**".into(), order: 1 },
        ];
        assert_eq!(
            engine.assemble(&blocks, &acme(), today()),
            "<h2>First for Acme Builders</h2><p><strong>now</strong></p>\n\n<h2>Second</h2><p><em>later</em></p>"
        );
    }

    #[test]
    fn test_values_are_not_treated_as_markup() {
        let engine = TemplateEngine::new(MemorySource::default());
        let data = TemplateData {
            business_name: Some("Star*Bright*Co".to_string()),
            additional_info: Some("- **all** sites".to_string()),
            ..Default::default()
        };
        let blocks = vec![TemplateBlock {
            title: "About".into(),
            content: "Owner: {{businessName}}\nNotes: {{additionalInfo}}\n- *{{businessName}}*".into(),
            order: 1,
        }];
        assert_eq!(
            engine.assemble(&blocks, &data, today()),
            "<h2>About</h2><p>Owner: Star*Bright*Co</p>\n<p>Notes: - **all** sites</p>\n<ul><li><em>Star*Bright*Co</em></li></ul>"
        );
    }

    #[test]
    fn test_render_produces_each_format() {
        let source = MemorySource::default().with("blocks/construction-trades/whs-policy.mdx", WHS_TEMPLATE);
        let engine = TemplateEngine::new(source);
        let artifacts = engine.render(
            "construction-trades",
            "whs-policy",
            &acme(),
            &[DocumentFormat::Pdf, DocumentFormat::Docx],
        );

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].filename, "Acme_Builders_whs_policy.pdf");
        assert!(artifacts[0].content.contains(r#"<div class="document-title">Work Health and Safety Policy</div>"#));
        assert_eq!(artifacts[1].filename, "Acme_Builders_whs_policy.docx");
        assert!(artifacts[1]
            .content
            .contains("<h2>Purpose</h2><p>Acme Builders is committed to a <strong>safe</strong> workplace.</p>"));
        assert!(artifacts[1].content.contains("<ul><li>Report hazards</li></ul>"));
    }

    #[test]
    fn test_render_without_business_name() {
        let engine = TemplateEngine::new(MemorySource::default());
        let artifacts = engine.render("ndis", "custom-doc", &TemplateData::default(), &[DocumentFormat::Docx]);
        assert_eq!(artifacts[0].filename, "_Business_Name__custom_doc.docx");
    }

    #[test]
    fn test_render_pack_covers_every_document() {
        let engine = TemplateEngine::new(MemorySource::default());
        let catalog = CatalogCache::default();
        let rendered = engine.render_pack(&catalog, "construction-trades", "lite", &acme()).unwrap();

        let ids: Vec<_> = rendered.iter().map(|d| d.document_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["whs-policy", "risk-assessment", "incident-reporting", "induction-checklist", "ppe-policy"]
        );
        assert!(rendered.iter().all(|d| d.artifacts.len() == 1));
        assert_eq!(rendered[0].artifacts[0].format, DocumentFormat::Pdf);
        assert!(rendered[0].artifacts[0].content.contains(&rendered[0].title));

        assert_eq!(catalog.len(), 1);

        assert!(engine.render_pack(&catalog, "construction-trades", "ndis-full", &acme()).is_none());
    }

    #[test]
    fn test_render_markdown_without_headings() {
        let engine = TemplateEngine::new(MemorySource::default());
        let artifacts = engine.render_markdown(
            "A single paragraph — no headings.",
            "generated",
            "Privacy Policy",
            &acme(),
            &[DocumentFormat::Docx],
        );
        assert_eq!(
            artifacts[0].content,
            "<h2>Privacy Policy</h2><p>A single paragraph - no headings.</p>"
        );
    }

    #[test]
    fn test_render_markdown_with_headings() {
        let engine = TemplateEngine::new(MemorySource::default());
        let artifacts = engine.render_markdown(
            "## Scope\nAll staff.\n\n## Contact\n{{contactEmail}}",
            "generated",
            "Privacy Policy",
            &acme(),
            &[DocumentFormat::Docx],
        );
        assert_eq!(
            artifacts[0].content,
            "<h2>Scope</h2><p>All staff.</p>\n\n<h2>Contact</h2><p>[Contact Email]</p>"
        );
    }
}
