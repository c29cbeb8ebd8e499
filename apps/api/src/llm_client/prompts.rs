// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; cross-cutting fragments live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts that embed résumé text, so the model keeps to the source.
pub const GROUNDING_INSTRUCTION: &str = "\
    Base every statement strictly on the text provided. \
    Do NOT infer, interpolate, or invent employers, dates, degrees, or skills. \
    If the text does not support a claim, leave it out.";
