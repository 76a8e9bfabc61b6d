//! Lightweight markdown-to-HTML conversion for template blocks.
//!
//! Conversion is an ordered list of named stages. Order matters: bold must
//! run before italic or `**x**` is read as two empty emphasis runs.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static BULLET_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^- (.+)$").unwrap());
static ITEM_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)(<li>.*</li>)").unwrap());
static LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(.+)$").unwrap());

pub trait MarkupStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, text: &str) -> String;
}

pub struct Bold;

impl MarkupStage for Bold {
    fn name(&self) -> &'static str {
        "bold"
    }

    fn apply(&self, text: &str) -> String {
        BOLD.replace_all(text, "<strong>${1}</strong>").into_owned()
    }
}

pub struct Italic;

impl MarkupStage for Italic {
    fn name(&self) -> &'static str {
        "italic"
    }

    fn apply(&self, text: &str) -> String {
        ITALIC.replace_all(text, "<em>${1}</em>").into_owned()
    }
}

/// `- x` lines become list items; the span from the first to the last item
/// is wrapped in a single `<ul>`.
pub struct BulletList;

impl MarkupStage for BulletList {
    fn name(&self) -> &'static str {
        "bullet-list"
    }

    fn apply(&self, text: &str) -> String {
        let items = BULLET_ITEM.replace_all(text, "<li>${1}</li>");
        ITEM_RUN.replace(&items, "<ul>${1}</ul>").into_owned()
    }
}

pub struct Paragraphs;

impl MarkupStage for Paragraphs {
    fn name(&self) -> &'static str {
        "paragraphs"
    }

    fn apply(&self, text: &str) -> String {
        let joined = text.replace("\n\n", "</p><p>");
        LINE.replace_all(&joined, "<p>${1}</p>")
            .replace("<p><ul>", "<ul>")
            .replace("</ul></p>", "</ul>")
    }
}

pub struct MarkupPipeline {
    stages: Vec<Box<dyn MarkupStage>>,
}

impl Default for MarkupPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl MarkupPipeline {
    pub fn new(stages: Vec<Box<dyn MarkupStage>>) -> Self {
        Self { stages }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(Bold),
            Box::new(Italic),
            Box::new(BulletList),
            Box::new(Paragraphs),
        ])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn render(&self, text: &str) -> String {
        self.stages
            .iter()
            .fold(text.to_string(), |acc, stage| stage.apply(&acc))
    }
}
