//! Industry Recommendation Augmenter.
//!
//! Appends industry rules and a regional line to the scorer's recommendations,
//! then caps the list.

use crate::audit::models::{AuditResults, BusinessProfile};

pub const MAX_RECOMMENDATIONS: usize = 8;

enum Condition {
    /// The named policy is among the missing policies.
    Missing(&'static str),
    /// The composite score is below the threshold.
    ScoreBelow(u32),
}

struct IndustryRule {
    industry: &'static str,
    condition: Condition,
    message: &'static str,
}

const INDUSTRY_RULES: &[IndustryRule] = &[
    IndustryRule {
        industry: "ndis",
        condition: Condition::Missing("NDIS Practice Standards Compliance"),
        message: "Implement NDIS Practice Standards compliance framework for registration requirements",
    },
    IndustryRule {
        industry: "ndis",
        condition: Condition::ScoreBelow(80),
        message: "Ensure all policies align with NDIS Quality and Safeguards Commission requirements",
    },
    IndustryRule {
        industry: "aged-care",
        condition: Condition::Missing("Aged Care Quality Standards Compliance"),
        message: "Develop Aged Care Quality Standards compliance documentation",
    },
    IndustryRule {
        industry: "aged-care",
        condition: Condition::ScoreBelow(85),
        message: "Review policies against Aged Care Quality and Safety Commission standards",
    },
    IndustryRule {
        industry: "healthcare",
        condition: Condition::Missing("Clinical Governance Policy"),
        message: "Establish clinical governance framework for healthcare service delivery",
    },
    IndustryRule {
        industry: "construction",
        condition: Condition::Missing("Work Health & Safety Policy"),
        message: "Prioritize WHS policy development - critical for construction industry compliance",
    },
    IndustryRule {
        industry: "childcare",
        condition: Condition::Missing("Child Protection Policy"),
        message: "Child Protection Policy is mandatory - implement immediately for regulatory compliance",
    },
];

impl Condition {
    fn holds(&self, results: &AuditResults) -> bool {
        match self {
            Condition::Missing(policy) => results.missing_policies.iter().any(|p| p == policy),
            Condition::ScoreBelow(threshold) => results.compliance_score < *threshold,
        }
    }
}

/// Returns the scorer's recommendations followed by industry and regional
/// additions, truncated to `MAX_RECOMMENDATIONS`.
pub fn generate_industry_recommendations(
    industry: &str,
    results: &AuditResults,
    profile: &BusinessProfile,
) -> Vec<String> {
    let key = industry.to_lowercase();
    let mut recommendations = results.recommendations.clone();

    recommendations.extend(
        INDUSTRY_RULES
            .iter()
            .filter(|rule| rule.industry == key && rule.condition.holds(results))
            .map(|rule| rule.message.to_string()),
    );

    if let Some(region) = profile.region.as_deref().filter(|r| !r.is_empty()) {
        recommendations.push(format!(
            "Ensure all policies comply with {region} state-specific regulations"
        ));
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
