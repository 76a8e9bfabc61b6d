// Document generation prompt templates.

/// Compliance-writer persona. Replace `{jurisdiction}` before sending.
pub const WRITER_SYSTEM_TEMPLATE: &str = "You are a master business document generator \
specialised in Australian compliance regulations. You produce detailed, professional \
documents that meet the legal requirements of each industry. {jurisdiction}";

/// Generation prompt.
/// Replace: {document_type}, {industry}, {business_details}
pub const GENERATION_PROMPT_TEMPLATE: &str = r###"Generate a {document_type} for a {industry} business.

Business details:
{business_details}

Include all necessary compliance clauses and tailor the content to Australian industry standards.
Provide comprehensive sections and make sure the document reads professionally.

Format the document as markdown:
- start each section with a line of the form "## Section Title"
- use "- " for bullet points and **bold** for key terms
- do not include a document title line or any commentary outside the document"###;
