//! Compliance Scorer: turns analysed files plus a benchmark into `AuditResults`.
//!
//! Pure functions only. No I/O, no LLM calls.

use crate::audit::models::{
    AuditFile, AuditResults, BusinessProfile, ComplianceBenchmark, ComplianceLevel,
    CurrencyStatus, DetailedAnalysis, OutdatedDocument, ScoringCriteria, ANALYSIS_FAILED,
    UNKNOWN_DOCUMENT,
};

const PRESENCE_THRESHOLD: u32 = 80;
const QUALITY_THRESHOLD: u32 = 70;
const ALIGNMENT_THRESHOLD: u32 = 70;
const CURRENCY_THRESHOLD: u32 = 60;
const MISSING_POLICIES_LISTED: usize = 3;

/// Bidirectional case-insensitive containment between a required policy and
/// a detected document type. This is the only matching rule.
pub fn policy_matches(required_policy: &str, detected_type: &str) -> bool {
    let required = required_policy.to_lowercase();
    let detected = detected_type.to_lowercase();
    detected.contains(&required) || required.contains(&detected)
}

/// Detected types that can satisfy a policy. Sentinels and blanks never do.
pub fn detected_types(files: &[AuditFile]) -> Vec<&str> {
    files
        .iter()
        .filter_map(|f| f.document_type_detected.as_deref())
        .filter(|t| !t.is_empty() && *t != UNKNOWN_DOCUMENT && *t != ANALYSIS_FAILED)
        .collect()
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * count as f64 / total as f64).round() as u32
}

/// Weighted sum of the four sub-scores. Weights are used as stored.
pub fn composite_score(analysis: &DetailedAnalysis, criteria: &ScoringCriteria) -> u32 {
    let weighted = f64::from(analysis.policy_presence_score) * criteria.policy_presence_weight
        + f64::from(analysis.content_quality_score) * criteria.content_quality_weight
        + f64::from(analysis.compliance_alignment_score) * criteria.compliance_alignment_weight
        + f64::from(analysis.document_currency_score) * criteria.document_currency_weight;

    (weighted / 100.0).round().max(0.0) as u32
}

pub fn calculate_compliance_score(
    files: &[AuditFile],
    benchmark: &ComplianceBenchmark,
    profile: &BusinessProfile,
) -> AuditResults {
    let detected = detected_types(files);

    let (completed_checks, missing_policies): (Vec<String>, Vec<String>) = benchmark
        .required_policies
        .iter()
        .cloned()
        .partition(|policy| detected.iter().any(|t| policy_matches(policy, t)));

    let quality_scores: Vec<u32> = files
        .iter()
        .filter_map(|f| f.quality_score)
        .filter(|&score| score > 0)
        .collect();
    let content_quality_score = if quality_scores.is_empty() {
        0
    } else {
        let sum: u32 = quality_scores.iter().sum();
        (f64::from(sum) / quality_scores.len() as f64).round() as u32
    };

    let high_compliance = files
        .iter()
        .filter(|f| f.compliance_level() == Some(ComplianceLevel::High))
        .count();
    let current = files
        .iter()
        .filter(|f| f.currency_status() == Some(CurrencyStatus::Current))
        .count();

    let detailed_analysis = DetailedAnalysis {
        policy_presence_score: percentage(completed_checks.len(), benchmark.required_policies.len()),
        content_quality_score,
        compliance_alignment_score: percentage(high_compliance, files.len()),
        document_currency_score: percentage(current, files.len()),
    };
    let compliance_score = composite_score(&detailed_analysis, &benchmark.scoring_criteria);

    let recommendations = score_recommendations(
        &detailed_analysis,
        compliance_score,
        &missing_policies,
        &benchmark.scoring_criteria,
        &profile.industry,
    );

    AuditResults {
        compliance_score,
        missing_policies,
        outdated_documents: outdated_documents(files),
        completed_checks,
        recommendations,
        detailed_analysis,
    }
}

fn score_recommendations(
    analysis: &DetailedAnalysis,
    compliance_score: u32,
    missing_policies: &[String],
    criteria: &ScoringCriteria,
    industry: &str,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if analysis.policy_presence_score < PRESENCE_THRESHOLD {
        let listed = missing_policies
            .iter()
            .take(MISSING_POLICIES_LISTED)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let suffix = if missing_policies.len() > MISSING_POLICIES_LISTED {
            " and others"
        } else {
            ""
        };
        recommendations.push(format!("Add missing critical policies: {listed}{suffix}"));
    }

    if analysis.content_quality_score < QUALITY_THRESHOLD {
        recommendations.push(
            "Improve document structure and content quality with professional formatting".to_string(),
        );
    }

    if analysis.compliance_alignment_score < ALIGNMENT_THRESHOLD {
        recommendations.push(format!(
            "Update policies to align with current {industry} industry standards"
        ));
    }

    if analysis.document_currency_score < CURRENCY_THRESHOLD {
        recommendations.push(
            "Review and update outdated policies with current legislation references".to_string(),
        );
    }

    if compliance_score < criteria.minimum_passing_score {
        recommendations
            .push("Consider professional compliance review before implementation".to_string());
    }

    recommendations
}

fn outdated_documents(files: &[AuditFile]) -> Vec<OutdatedDocument> {
    files
        .iter()
        .filter_map(|f| {
            let analysis = f.analysis_results.as_ref()?;
            let outdated = analysis.currency_status == CurrencyStatus::Outdated;
            if !outdated && analysis.issues.is_empty() {
                return None;
            }

            let issue = if outdated {
                "Document appears outdated".to_string()
            } else {
                analysis
                    .issues
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Quality issues detected".to_string())
            };
            let recommendation = analysis
                .recommendations
                .first()
                .cloned()
                .unwrap_or_else(|| "Review and update document".to_string());

            Some(OutdatedDocument {
                file_name: f.file_name.clone(),
                issue,
                recommendation,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::audit::models::AnalysisResult;
    use serde_json::json;
    use std::collections::HashSet;
    use uuid::Uuid;

    pub(crate) fn analysed(
        name: &str,
        document_type: &str,
        quality: u32,
        level: ComplianceLevel,
        currency: CurrencyStatus,
    ) -> AuditFile {
        let analysis = AnalysisResult {
            document_type: document_type.to_string(),
            quality_score: quality,
            compliance_level: level,
            currency_status: currency,
            issues: vec![],
            strengths: vec![],
            recommendations: vec![],
            error: None,
            raw_analysis: None,
        };
        AuditFile {
            id: Uuid::new_v4(),
            file_name: name.to_string(),
            file_path: format!("audit_uploads/s1/{name}"),
            size: 512,
            mime_type: "application/pdf".to_string(),
            analysis_results: None,
            document_type_detected: None,
            quality_score: None,
        }
        .with_analysis(analysis)
    }

    pub(crate) fn profile(industry: &str) -> BusinessProfile {
        BusinessProfile {
            business_name: "Acme Care".to_string(),
            industry: industry.to_string(),
            sub_industry: None,
            city: "Brisbane".to_string(),
            region: None,
            org_size: None,
            abn: None,
        }
    }

    fn benchmark(policies: &[&str]) -> ComplianceBenchmark {
        ComplianceBenchmark {
            id: "b-1".to_string(),
            industry: "ndis".to_string(),
            sub_industry: None,
            required_policies: policies.iter().map(|p| p.to_string()).collect(),
            scoring_criteria: ScoringCriteria::default(),
            metadata: json!({}),
        }
    }

    #[test]
    fn test_policy_matches_both_directions() {
        assert!(policy_matches("Privacy Policy", "privacy policy (2023 revision)"));
        assert!(policy_matches("Work Health & Safety Policy", "Safety Policy"));
        assert!(!policy_matches("Privacy Policy", "Code of Conduct"));
    }

    #[test]
    fn test_sentinel_types_never_match() {
        let files = vec![
            analysed("a.pdf", UNKNOWN_DOCUMENT, 50, ComplianceLevel::Medium, CurrencyStatus::Unknown),
            analysed("b.pdf", ANALYSIS_FAILED, 0, ComplianceLevel::Low, CurrencyStatus::Unknown),
            analysed("c.pdf", "", 40, ComplianceLevel::Low, CurrencyStatus::Unknown),
        ];
        assert!(detected_types(&files).is_empty());

        // An empty type would otherwise be contained in every policy name.
        let results = calculate_compliance_score(&files, &benchmark(&["Privacy Policy"]), &profile("ndis"));
        assert_eq!(results.missing_policies, vec!["Privacy Policy"]);
    }

    #[test]
    fn test_composite_of_known_sub_scores() {
        let analysis = DetailedAnalysis {
            policy_presence_score: 80,
            content_quality_score: 70,
            compliance_alignment_score: 60,
            document_currency_score: 50,
        };
        assert_eq!(composite_score(&analysis, &ScoringCriteria::default()), 70);
    }

    #[test]
    fn test_composite_bounded_when_weights_sum_to_100() {
        let criteria = ScoringCriteria {
            policy_presence_weight: 50.0,
            content_quality_weight: 25.0,
            compliance_alignment_weight: 15.0,
            document_currency_weight: 10.0,
            minimum_passing_score: 70,
        };
        for score in [0, 33, 67, 100] {
            let analysis = DetailedAnalysis {
                policy_presence_score: score,
                content_quality_score: 100 - score,
                compliance_alignment_score: score,
                document_currency_score: 100,
            };
            assert!(composite_score(&analysis, &criteria) <= 100);
        }
        let perfect = DetailedAnalysis {
            policy_presence_score: 100,
            content_quality_score: 100,
            compliance_alignment_score: 100,
            document_currency_score: 100,
        };
        assert_eq!(composite_score(&perfect, &criteria), 100);
    }

    #[test]
    fn test_all_files_failed_scores_zero() {
        let files = vec![
            analysed("a.pdf", ANALYSIS_FAILED, 0, ComplianceLevel::Low, CurrencyStatus::Unknown),
            analysed("b.pdf", ANALYSIS_FAILED, 0, ComplianceLevel::Low, CurrencyStatus::Unknown),
        ];
        let required = ["Privacy Policy", "Code of Conduct", "Risk Management Policy"];
        let results = calculate_compliance_score(&files, &benchmark(&required), &profile("ndis"));

        assert_eq!(results.detailed_analysis, DetailedAnalysis::default());
        assert_eq!(results.compliance_score, 0);
        assert_eq!(results.missing_policies, required);
        assert!(results.completed_checks.is_empty());
    }

    #[test]
    fn test_no_files_scores_zero() {
        let results = calculate_compliance_score(&[], &benchmark(&["Privacy Policy"]), &profile("ndis"));
        assert_eq!(results.compliance_score, 0);
        assert!(results.outdated_documents.is_empty());
    }

    #[test]
    fn test_missing_and_completed_partition_required_policies() {
        let required = [
            "Privacy Policy",
            "Code of Conduct",
            "Incident Management Policy",
            "Complaints Management Policy",
        ];
        let files = vec![
            analysed("p.pdf", "Privacy Policy", 80, ComplianceLevel::High, CurrencyStatus::Current),
            analysed("c.pdf", "Complaints Management Policy", 70, ComplianceLevel::Medium, CurrencyStatus::Outdated),
        ];
        let results = calculate_compliance_score(&files, &benchmark(&required), &profile("ndis"));

        assert_eq!(results.completed_checks, vec!["Privacy Policy", "Complaints Management Policy"]);
        assert_eq!(results.missing_policies, vec!["Code of Conduct", "Incident Management Policy"]);

        let missing: HashSet<_> = results.missing_policies.iter().collect();
        let completed: HashSet<_> = results.completed_checks.iter().collect();
        assert!(missing.is_disjoint(&completed));
        assert_eq!(missing.len() + completed.len(), required.len());
    }

    #[test]
    fn test_sub_scores_and_recommendations() {
        let required = [
            "Privacy Policy",
            "Code of Conduct",
            "Incident Management Policy",
            "Complaints Management Policy",
            "Risk Management Policy",
        ];
        let files = vec![
            analysed("p.pdf", "Privacy Policy", 60, ComplianceLevel::High, CurrencyStatus::Current),
            analysed("x.pdf", ANALYSIS_FAILED, 0, ComplianceLevel::Low, CurrencyStatus::Unknown),
        ];
        let results = calculate_compliance_score(&files, &benchmark(&required), &profile("ndis"));

        assert_eq!(results.detailed_analysis.policy_presence_score, 20);
        // Zero scores are excluded from the quality mean.
        assert_eq!(results.detailed_analysis.content_quality_score, 60);
        assert_eq!(results.detailed_analysis.compliance_alignment_score, 50);
        assert_eq!(results.detailed_analysis.document_currency_score, 50);
        // 20*0.4 + 60*0.3 + 50*0.2 + 50*0.1 = 41
        assert_eq!(results.compliance_score, 41);
        assert_eq!(
            results.recommendations,
            vec![
                "Add missing critical policies: Code of Conduct, Incident Management Policy, Complaints Management Policy and others",
                "Improve document structure and content quality with professional formatting",
                "Update policies to align with current ndis industry standards",
                "Review and update outdated policies with current legislation references",
                "Consider professional compliance review before implementation",
            ]
        );
    }

    #[test]
    fn test_three_missing_policies_have_no_suffix() {
        let required = ["Privacy Policy", "Code of Conduct", "Risk Management Policy"];
        let results = calculate_compliance_score(&[], &benchmark(&required), &profile("ndis"));
        assert_eq!(
            results.recommendations[0],
            "Add missing critical policies: Privacy Policy, Code of Conduct, Risk Management Policy"
        );
    }

    #[test]
    fn test_outdated_documents_entries() {
        let mut stale = analysed("old.pdf", "Privacy Policy", 70, ComplianceLevel::Medium, CurrencyStatus::Outdated);
        if let Some(a) = stale.analysis_results.as_mut() {
            a.issues = vec!["References repealed Act".to_string()];
        }
        let mut flawed = analysed("flawed.pdf", "Code of Conduct", 60, ComplianceLevel::Medium, CurrencyStatus::Current);
        if let Some(a) = flawed.analysis_results.as_mut() {
            a.issues = vec!["No sign-off section".to_string()];
            a.recommendations = vec!["Add a sign-off block".to_string()];
        }
        let clean = analysed("ok.pdf", "Risk Management Policy", 90, ComplianceLevel::High, CurrencyStatus::Current);

        let docs = outdated_documents(&[stale, flawed, clean]);

        assert_eq!(
            docs,
            vec![
                OutdatedDocument {
                    file_name: "old.pdf".to_string(),
                    issue: "Document appears outdated".to_string(),
                    recommendation: "Review and update document".to_string(),
                },
                OutdatedDocument {
                    file_name: "flawed.pdf".to_string(),
                    issue: "No sign-off section".to_string(),
                    recommendation: "Add a sign-off block".to_string(),
                },
            ]
        );
    }
}
