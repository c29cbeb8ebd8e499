//! Personal Info Extractor — pulls name, contact details, links and location
//! out of the header block. Lines claimed by any field are excluded from the
//! residual `others` text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parsing::entities::{EntityLabel, EntityRecognizer};

/// Domain fragments of personal mailboxes; URLs containing them are not websites.
const EMAIL_PROVIDER_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "aol.com",
    ".edu",
];

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^@|\s]+@[^@]+\.[^@|\s]+)").expect("valid email pattern"));

// country code, area code (bare or parenthesised), exchange, subscriber, extension
static MOBILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:(?:\+?([1-9]|[0-9][0-9]|[0-9][0-9][0-9])\s*(?:[.-]\s*)?)?",
        r"(?:\(\s*([2-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9])\s*\)",
        r"|([0-9][1-9]|[0-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9]))\s*(?:[.-]\s*)?)?",
        r"([2-9]1[02-9]|[2-9][02-9]1|[2-9][02-9]{2})\s*(?:[.-]\s*)?",
        r"([0-9]{4})",
        r"(?:\s*(?:#|x\.?|ext\.?|extension)\s*(\d+))?",
    ))
    .expect("valid mobile pattern")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:https?://)?(?:www\.)?[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(?:/[^\s]*)?\b")
        .expect("valid url pattern")
});

/// Personal fields of a résumé header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub websites: Vec<String>,
    pub location: Option<String>,
    /// Unclaimed, non-blank header lines joined with ", ".
    pub others: String,
}

/// Indices of header lines already attributed to a field.
#[derive(Debug, Clone, Default)]
pub struct ClaimedLines(HashSet<usize>);

impl ClaimedLines {
    pub fn claim(&mut self, index: usize) {
        self.0.insert(index);
    }

    pub fn is_claimed(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

/// A field value and the header line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub value: String,
    pub line: usize,
}

impl FieldMatch {
    /// True when the value is the whole (trimmed) source line.
    fn covers_line(&self, lines: &[String]) -> bool {
        lines
            .get(self.line)
            .is_some_and(|l| l.trim() == self.value)
    }
}

/// Runs every field extractor over `lines` and collects the residual text.
pub fn extract_personal_information(
    lines: &[String],
    recognizer: &dyn EntityRecognizer,
) -> PersonalInfo {
    let mut claimed = ClaimedLines::default();

    let name = extract_name(lines, recognizer);
    if let Some(m) = name.as_ref().filter(|m| m.covers_line(lines)) {
        claimed.claim(m.line);
    }

    let location = extract_location(lines, recognizer);
    if let Some(m) = location.as_ref().filter(|m| m.covers_line(lines)) {
        claimed.claim(m.line);
    }

    let (email, mobile) = extract_contact(lines, &mut claimed);
    let websites = extract_websites(lines, &mut claimed);
    let others = residual_text(lines, &claimed);

    PersonalInfo {
        name: name.map(|m| m.value).unwrap_or_default(),
        email,
        mobile,
        websites,
        location: location.map(|m| m.value),
        others,
    }
}

/// Pass 1: first PERSON entity among digit-free lines.
/// Pass 2: first digit- and comma-free line that is all caps or title case.
pub fn extract_name(lines: &[String], recognizer: &dyn EntityRecognizer) -> Option<FieldMatch> {
    let has_digit = |s: &str| s.chars().any(|c| c.is_ascii_digit());

    for (line, raw) in lines.iter().enumerate() {
        let clean = raw.trim();
        if has_digit(clean) {
            continue;
        }
        if let Some(span) = recognizer
            .recognize(clean)
            .into_iter()
            .find(|s| s.label == EntityLabel::Person)
        {
            return Some(FieldMatch {
                value: span.text,
                line,
            });
        }
    }

    lines.iter().enumerate().find_map(|(line, raw)| {
        let clean = raw.trim();
        if clean.is_empty() || clean.contains(',') || has_digit(clean) {
            return None;
        }
        (is_all_caps(clean) || is_title_case(clean)).then(|| FieldMatch {
            value: clean.to_string(),
            line,
        })
    })
}

/// First GPE entity across all lines.
pub fn extract_location(lines: &[String], recognizer: &dyn EntityRecognizer) -> Option<FieldMatch> {
    lines.iter().enumerate().find_map(|(line, raw)| {
        recognizer
            .recognize(raw.trim())
            .into_iter()
            .find(|s| s.label == EntityLabel::Gpe)
            .map(|span| FieldMatch {
                value: span.text,
                line,
            })
    })
}

/// First `local@domain` token in `text`, with surrounding `;` removed.
pub fn extract_email(text: &str) -> Option<String> {
    let found = EMAIL_RE.find(text)?;
    let token = found.as_str().split_whitespace().next()?.trim_matches(';');
    (!token.is_empty()).then(|| token.to_string())
}

/// First phone number in `text`, digits concatenated; numbers longer than ten
/// digits carry a leading `+`.
pub fn extract_mobile(text: &str) -> Option<String> {
    let caps = MOBILE_RE.captures(text)?;
    let digits: String = caps
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .collect();
    if digits.chars().count() > 10 {
        Some(format!("+{digits}"))
    } else {
        Some(digits)
    }
}

/// URL-shaped tokens in `text`, skipping pieces of email addresses.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .filter(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            before != Some('@') && after != Some('@')
        })
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn is_personal_email_domain(url: &str) -> bool {
    EMAIL_PROVIDER_DOMAINS.iter().any(|d| url.contains(d))
}

/// Single pass for email and mobile, stopping once both are found.
/// A line matching both is claimed once.
fn extract_contact(
    lines: &[String],
    claimed: &mut ClaimedLines,
) -> (Option<String>, Option<String>) {
    let mut email = None;
    let mut mobile = None;

    for (index, line) in lines.iter().enumerate() {
        if email.is_none() {
            if let Some(found) = extract_email(line) {
                email = Some(found);
                claimed.claim(index);
            }
        }
        if mobile.is_none() {
            if let Some(found) = extract_mobile(line) {
                mobile = Some(found);
                claimed.claim(index);
            }
        }
        if email.is_some() && mobile.is_some() {
            break;
        }
    }

    (email, mobile)
}

fn extract_websites(lines: &[String], claimed: &mut ClaimedLines) -> Vec<String> {
    let mut websites = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let legit: Vec<String> = extract_urls(line)
            .into_iter()
            .filter(|url| !is_personal_email_domain(url))
            .collect();
        if !legit.is_empty() {
            websites.extend(legit);
            claimed.claim(index);
        }
    }
    websites
}

fn residual_text(lines: &[String], claimed: &ClaimedLines) -> String {
    lines
        .iter()
        .enumerate()
        .filter(|(index, line)| !claimed.is_claimed(*index) && !line.trim().is_empty())
        .map(|(_, line)| line.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

fn is_all_caps(s: &str) -> bool {
    s.chars().any(is_cased) && !s.chars().any(char::is_lowercase)
}

/// Uppercase letters only after uncased characters, lowercase only after cased
/// ones, and at least one cased character.
fn is_title_case(s: &str) -> bool {
    let mut seen_cased = false;
    let mut previous_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else {
            previous_cased = false;
        }
    }
    seen_cased
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::entities::EntitySpan;

    /// Tags exact, pre-registered strings.
    struct StubRecognizer {
        people: Vec<&'static str>,
        places: Vec<&'static str>,
    }

    impl EntityRecognizer for StubRecognizer {
        fn recognize(&self, text: &str) -> Vec<EntitySpan> {
            let mut spans = Vec::new();
            for (label, names) in [
                (EntityLabel::Person, &self.people),
                (EntityLabel::Gpe, &self.places),
            ] {
                for name in names.iter() {
                    if let Some(start) = text.find(name) {
                        spans.push(EntitySpan {
                            label: label.clone(),
                            text: name.to_string(),
                            start,
                            end: start + name.len(),
                        });
                    }
                }
            }
            spans.sort_by_key(|s| s.start);
            spans
        }
    }

    fn stub() -> StubRecognizer {
        StubRecognizer {
            people: vec!["Jane Doe"],
            places: vec!["San Francisco"],
        }
    }

    fn blind() -> StubRecognizer {
        StubRecognizer {
            people: vec![],
            places: vec![],
        }
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_header_is_consumed() {
        let header = lines(&[
            "Jane Doe",
            "jane.doe@gmail.com",
            "+1 415-555-0100",
            "linkedin.com/in/janedoe",
            "San Francisco",
        ]);
        let info = extract_personal_information(&header, &stub());

        assert_eq!(info.name, "Jane Doe");
        assert_eq!(info.email.as_deref(), Some("jane.doe@gmail.com"));
        assert_eq!(info.mobile.as_deref(), Some("+14155550100"));
        assert_eq!(info.websites, vec!["linkedin.com/in/janedoe".to_string()]);
        assert!(info.websites.iter().all(|w| !w.contains("gmail")));
        assert_eq!(info.location.as_deref(), Some("San Francisco"));
        assert_eq!(info.others, "");
    }

    #[test]
    fn test_unclaimed_lines_become_others() {
        let header = lines(&[
            "Jane Doe",
            "",
            "Backend engineer who likes compilers",
            "   ",
            "jane@example.org",
            "Open to relocation",
        ]);
        let info = extract_personal_information(&header, &stub());
        assert_eq!(
            info.others,
            "Backend engineer who likes compilers, Open to relocation"
        );
        assert_eq!(info.email.as_deref(), Some("jane@example.org"));
        assert!(info.websites.is_empty());
    }

    #[test]
    fn test_partial_entity_line_is_not_claimed() {
        let header = lines(&["Jane Doe", "San Francisco, CA"]);
        let info = extract_personal_information(&header, &stub());
        assert_eq!(info.location.as_deref(), Some("San Francisco"));
        assert_eq!(info.others, "San Francisco, CA");
    }

    #[test]
    fn test_absent_fields_are_empty_not_errors() {
        let info = extract_personal_information(&[], &blind());
        assert_eq!(info, PersonalInfo::default());
    }

    #[test]
    fn test_name_skips_lines_with_digits_for_ner() {
        let header = lines(&["Jane Doe 2024", "Jane Doe"]);
        let found = extract_name(&header, &stub()).unwrap();
        assert_eq!(found.line, 1);
    }

    #[test]
    fn test_name_formatting_fallback() {
        let header = lines(&[
            "",
            "Seattle, WA",
            "415 555 0100",
            "John Q. Public",
            "JOHN Q PUBLIC",
        ]);
        let found = extract_name(&header, &blind()).unwrap();
        assert_eq!(found.value, "John Q. Public");
        assert_eq!(found.line, 3);
    }

    #[test]
    fn test_name_fallback_accepts_all_caps() {
        let header = lines(&["jane doe", "JANE DOE"]);
        assert_eq!(extract_name(&header, &blind()).unwrap().value, "JANE DOE");
    }

    #[test]
    fn test_name_fallback_skips_symbol_only_lines() {
        let header = lines(&["•••", "Jane Doe"]);
        assert_eq!(extract_name(&header, &blind()).unwrap().value, "Jane Doe");
    }

    #[test]
    fn test_no_name_found() {
        let header = lines(&["jane doe", "jane@x.io"]);
        assert!(extract_name(&header, &blind()).is_none());
    }

    #[test]
    fn test_location_first_gpe_any_line() {
        let header = lines(&["Jane Doe", "Lives in San Francisco 94107"]);
        let found = extract_location(&header, &stub()).unwrap();
        assert_eq!(found.value, "San Francisco");
        assert_eq!(found.line, 1);
    }

    #[test]
    fn test_email_trims_semicolons_and_takes_first_token() {
        assert_eq!(
            extract_email("Email: jane@x.io; tel").as_deref(),
            Some("jane@x.io")
        );
        assert_eq!(extract_email("no address here"), None);
    }

    #[test]
    fn test_mobile_variants() {
        assert_eq!(extract_mobile("(415) 555-0100").as_deref(), Some("4155550100"));
        assert_eq!(extract_mobile("415.555.0100").as_deref(), Some("4155550100"));
        assert_eq!(
            extract_mobile("+1 415-555-0100").as_deref(),
            Some("+14155550100")
        );
        assert_eq!(
            extract_mobile("415-555-0100 ext. 42").as_deref(),
            Some("+415555010042")
        );
        assert_eq!(extract_mobile("Jane Doe"), None);
    }

    #[test]
    fn test_contact_on_one_line_claims_once() {
        let header = lines(&["jane@x.io | 415-555-0100", "Remote"]);
        let mut claimed = ClaimedLines::default();
        let (email, mobile) = extract_contact(&header, &mut claimed);
        assert_eq!(email.as_deref(), Some("jane@x.io"));
        assert_eq!(mobile.as_deref(), Some("4155550100"));
        assert!(claimed.is_claimed(0));
        assert!(!claimed.is_claimed(1));
    }

    #[test]
    fn test_first_email_and_mobile_win() {
        let header = lines(&["a@x.io", "b@y.io", "415-555-0100", "212-555-0199"]);
        let mut claimed = ClaimedLines::default();
        let (email, mobile) = extract_contact(&header, &mut claimed);
        assert_eq!(email.as_deref(), Some("a@x.io"));
        assert_eq!(mobile.as_deref(), Some("4155550100"));
        assert!(!claimed.is_claimed(1));
        assert!(!claimed.is_claimed(3));
    }

    #[test]
    fn test_urls_skip_email_parts() {
        assert!(extract_urls("jane.doe@acme.io").is_empty());
        assert_eq!(
            extract_urls("https://github.com/jane and www.jane.dev"),
            vec!["https://github.com/jane".to_string(), "www.jane.dev".to_string()]
        );
    }

    #[test]
    fn test_websites_filter_email_providers() {
        let header = lines(&["portfolio: jane.yahoo.com", "cs.stanford.edu/~jane", "jane.dev"]);
        let mut claimed = ClaimedLines::default();
        let sites = extract_websites(&header, &mut claimed);
        assert_eq!(sites, vec!["jane.dev".to_string()]);
        assert!(!claimed.is_claimed(0));
        assert!(!claimed.is_claimed(1));
        assert!(claimed.is_claimed(2));
    }

    #[test]
    fn test_title_case_rules() {
        assert!(is_title_case("Jane Doe"));
        assert!(is_title_case("O'Neil Smith"));
        assert!(!is_title_case("JaNe Doe"));
        assert!(!is_title_case("jane Doe"));
        assert!(!is_title_case("---"));
        assert!(is_all_caps("JANE DOE"));
        assert!(!is_all_caps("---"));
    }
}
