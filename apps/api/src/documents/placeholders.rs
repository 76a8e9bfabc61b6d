//! `{{variable}}` substitution for template blocks.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use serde::Deserialize;

use crate::documents::envelope::escape_html;

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

/// Business details supplied with a render request. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateData {
    pub business_name: Option<String>,
    pub abn: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub document_type: Option<String>,
    pub additional_info: Option<String>,
}

impl TemplateData {
    /// Business name for headers and filenames.
    pub fn business_name_or_placeholder(&self) -> String {
        present(&self.business_name)
            .map(str::to_string)
            .unwrap_or_else(|| "[Business Name]".to_string())
    }

    /// The field a known variable reads, `None` for unknown variables.
    fn field(&self, name: &str) -> Option<&Option<String>> {
        Some(match name {
            "businessName" => &self.business_name,
            "abn" => &self.abn,
            "address" => &self.address,
            "contactEmail" => &self.contact_email,
            "contactPhone" => &self.contact_phone,
            "website" => &self.website,
            "industry" => &self.industry,
            "documentType" => &self.document_type,
            "additionalInfo" => &self.additional_info,
            _ => return None,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn known_placeholder(name: &str) -> Option<&'static str> {
    Some(match name {
        "businessName" => "[Business Name]",
        "abn" => "[ABN]",
        "address" => "[Business Address]",
        "contactEmail" => "[Contact Email]",
        "contactPhone" => "[Contact Phone]",
        "website" => "[Website]",
        "industry" => "[Industry]",
        "documentType" => "[Document Type]",
        "additionalInfo" => "[Additional Info]",
        _ => return None,
    })
}

/// `ownerName` and `owner_name` both become `[Owner Name]`.
fn bracketed_label(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    let label: Vec<String> = words.iter().map(|w| capitalize(w)).collect();
    format!("[{}]", label.join(" "))
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// en-AU long form, e.g. `7 March 2024`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Replaces every variable in `text`. Supplied values are HTML-escaped;
/// placeholders are not.
pub fn substitute(text: &str, data: &TemplateData, today: NaiveDate) -> String {
    VARIABLE
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            if name == "currentDate" {
                return long_date(today);
            }
            match data.field(name) {
                Some(field) => match present(field) {
                    Some(value) => escape_html(value),
                    None => known_placeholder(name).unwrap_or_default().to_string(),
                },
                None => bracketed_label(name),
            }
        })
        .into_owned()
}
