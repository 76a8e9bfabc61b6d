// Shared prompt fragments.
// Each service that needs inference calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments only.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with a single valid JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies outside the JSON object.";

/// Jurisdiction framing shared by audit and generation prompts.
pub const JURISDICTION_CONTEXT: &str = "All assessments and documents target Australian \
    businesses: reference current Commonwealth and state legislation, regulators and \
    industry standards where relevant.";
