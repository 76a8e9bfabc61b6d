//! Catalog Resolver: pack inclusion rules and catalog statistics.
//!
//! Unknown industries and packs resolve to empty results, never errors.

use serde::Serialize;

use crate::catalog::data::{CatalogDoc, Industry, PackDefinition, PackIncludes, INDUSTRIES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub industries: usize,
    pub total_documents: usize,
    pub lite_documents: usize,
    pub pro_documents: usize,
}

pub fn find_industry(industry_id: &str) -> Option<&'static Industry> {
    INDUSTRIES.iter().find(|i| i.id == industry_id)
}

pub fn industry_label(industry_id: &str) -> Option<&'static str> {
    find_industry(industry_id).map(|i| i.label)
}

pub fn find_pack(industry_id: &str, pack_id: &str) -> Option<&'static PackDefinition> {
    find_industry(industry_id)?.packs.iter().find(|p| p.id == pack_id)
}

pub fn find_document(industry_id: &str, doc_id: &str) -> Option<&'static CatalogDoc> {
    find_industry(industry_id)?.documents.iter().find(|d| d.id == doc_id)
}

pub fn list_packs(industry_id: &str) -> Vec<PackDefinition> {
    find_industry(industry_id)
        .map(|i| i.packs.to_vec())
        .unwrap_or_default()
}

pub fn list_documents(industry_id: &str) -> Vec<CatalogDoc> {
    find_industry(industry_id)
        .map(|i| i.documents.to_vec())
        .unwrap_or_default()
}

/// Documents a pack contains, in catalog order.
///
/// `all` and `all-plus-extras` currently resolve to the same list.
pub fn resolve_documents_for_pack(industry_id: &str, pack_id: &str) -> Vec<CatalogDoc> {
    let Some(pack) = find_pack(industry_id, pack_id) else {
        return Vec::new();
    };
    let documents = list_documents(industry_id);

    match pack.includes {
        PackIncludes::Subset => documents.into_iter().filter(|d| d.in_lite).collect(),
        PackIncludes::All | PackIncludes::AllPlusExtras => documents,
    }
}

pub fn validate_pack(industry_id: &str, pack_id: &str) -> bool {
    find_pack(industry_id, pack_id).is_some()
}

pub fn compute_catalog_stats() -> CatalogStats {
    let total_documents: usize = INDUSTRIES.iter().map(|i| i.documents.len()).sum();
    let lite_documents: usize = INDUSTRIES
        .iter()
        .map(|i| i.documents.iter().filter(|d| d.in_lite).count())
        .sum();

    CatalogStats {
        industries: INDUSTRIES.len(),
        total_documents,
        lite_documents,
        pro_documents: total_documents - lite_documents,
    }
}

/// Relative path of a document's template under the templates root.
pub fn template_path(industry_id: &str, doc_id: &str) -> String {
    format!("blocks/{industry_id}/{doc_id}.mdx")
}
