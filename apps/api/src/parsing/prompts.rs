// Prompt constants for the model-backed section fallback.

/// System prompt for section extraction. Combined with `JSON_ONLY_SYSTEM` at call time.
pub const SECTION_EXTRACT_SYSTEM: &str = "You are an expert resume section extractor.";

/// Section extraction prompt. Replace `{lines}` with a JSON array of the résumé lines.
pub const SECTION_EXTRACT_PROMPT_TEMPLATE: &str = r#"Read the resume below carefully. Each string in the input array is one line, in document order.

Extract the following:
- resume_header: every line that forms the introductory part of the resume. This typically includes the candidate's name, contact information (phone, email, LinkedIn, portfolio link), and a brief summary or objective if it opens the document.
- resume_body: every line of the main content, excluding the header. This includes sections like "Experience", "Education", "Skills", "Projects", "Awards" and their details.
- resume_body_headers: only the section titles found in resume_body, e.g. "EXPERIENCE", "EDUCATION", "SKILLS", "PROJECTS".

Copy lines verbatim; do not merge, split, or reword them.

Return a JSON object with this EXACT schema (no extra fields):
{
  "resume_header": ["..."],
  "resume_body": ["..."],
  "resume_body_headers": ["..."]
}

Input:
{lines}
"#;
