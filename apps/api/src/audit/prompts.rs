// Audit LLM prompt templates.
// All prompts for the audit module are defined here.

/// Auditor persona. Replace `{industry}`, `{json_only}` and `{jurisdiction}` before sending.
pub const AUDITOR_SYSTEM_TEMPLATE: &str = "You are an expert business compliance auditor \
specialising in {industry} industry documentation. Analyse uploaded documents for compliance \
gaps, quality issues and regulatory alignment, and give actionable feedback that helps the \
business understand its compliance readiness. {jurisdiction} {json_only}";

/// Document analysis prompt.
/// Replace: {file_name}, {business_name}, {industry}, {sub_industry_line}, {excerpt_section}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Assess the uploaded business document below.

File: {file_name}
Business: {business_name}
Industry: {industry}
{sub_industry_line}
{excerpt_section}
Report on:

1. DOCUMENT TYPE: the policy or document this is, named as a primary category
   (for example "Privacy Policy", "Work Health & Safety Policy", "Code of Conduct").
2. CONTENT QUALITY (0-100): completeness, professional structure, clarity, industry relevance.
3. COMPLIANCE: regulatory compliance level, industry-specific coverage, missing critical
   sections or clauses, outdated language.
4. CURRENCY: evidence of recent review, references to current legislation, date indicators.
5. ISSUES: concrete gaps, outdated references, missing mandatory sections, compliance risks.

Return a JSON object with this EXACT schema:
{
  "documentType": "detected document type",
  "qualityScore": 85,
  "complianceLevel": "high|medium|low",
  "currencyStatus": "current|outdated|unknown",
  "issues": ["issue 1", "issue 2"],
  "strengths": ["strength 1", "strength 2"],
  "recommendations": ["recommendation 1", "recommendation 2"]
}"#;

/// Wraps extracted document text. Replace `{excerpt}`.
pub const EXCERPT_SECTION_TEMPLATE: &str = "\nDOCUMENT EXCERPT (may be truncated):\n\"\"\"\n{excerpt}\n\"\"\"\n";
