//! Plain-text and markdown renderings of a parsed résumé record.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ResumeRecord;

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("valid space pattern"));
static INDENTED_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s+").expect("valid indent pattern"));

/// Normalises extracted text: literal `\n` escapes become newlines, tabs become
/// spaces, space runs collapse, indentation after a newline is dropped.
pub fn clean_text(text: &str) -> String {
    let text = text.replace("\\n", "\n").replace('\t', " ");
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = INDENTED_NEWLINE.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Body blocks joined with newlines in Education, Experience, Skills, Others order.
pub fn body_text(record: &ResumeRecord) -> String {
    let body = &record.body;
    [
        body.education.as_str(),
        body.experience.as_str(),
        body.skills.as_str(),
        body.others.as_str(),
    ]
    .join("\n")
}

/// Markdown rendering: `**Field:** value` for each non-empty personal field,
/// then a `### Section` block for each non-empty body block.
pub fn format_resume_markdown(record: &ResumeRecord) -> String {
    let personal = &record.personal;
    let websites = personal.websites.join(", ");
    let fields: [(&str, &str); 6] = [
        ("Name", personal.name.as_str()),
        ("Email", personal.email.as_deref().unwrap_or_default()),
        ("Mobile", personal.mobile.as_deref().unwrap_or_default()),
        ("Websites", websites.as_str()),
        ("Location", personal.location.as_deref().unwrap_or_default()),
        ("Others", personal.others.as_str()),
    ];

    let mut parts: Vec<String> = fields
        .iter()
        .filter_map(|(label, value)| {
            let cleaned = clean_text(value);
            (!cleaned.is_empty()).then(|| format!("**{label}:** {cleaned}"))
        })
        .collect();

    let body = &record.body;
    let sections: [(&str, &str); 4] = [
        ("Education", body.education.as_str()),
        ("Experience", body.experience.as_str()),
        ("Skills", body.skills.as_str()),
        ("Others", body.others.as_str()),
    ];
    parts.extend(sections.iter().filter_map(|(label, value)| {
        let cleaned = clean_text(value);
        (!cleaned.is_empty()).then(|| format!("### {label}\n{cleaned}"))
    }));

    parts.join("\n\n")
}
