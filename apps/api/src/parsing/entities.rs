//! Entity recognition boundary used for name and location extraction.
//!
//! The extractor only needs PERSON and GPE spans, so the contract is a single
//! `recognize` call. `GazetteerRecognizer` is the built-in rule-based
//! implementation: a place gazetteer for GPE and a capitalised-words shape rule
//! for PERSON.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    /// Geopolitical entity: city, state, country.
    Gpe,
    Other(String),
}

/// A tagged span. `start`/`end` are byte offsets into the recognised text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Named-entity recognition capability. Implementations must be deterministic
/// for a given input and safe to share across documents.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

const PLACES: &[&str] = &[
    // countries
    "United States",
    "USA",
    "Canada",
    "Mexico",
    "Brazil",
    "Argentina",
    "United Kingdom",
    "England",
    "Scotland",
    "Ireland",
    "France",
    "Germany",
    "Spain",
    "Portugal",
    "Italy",
    "Netherlands",
    "Belgium",
    "Switzerland",
    "Austria",
    "Sweden",
    "Norway",
    "Denmark",
    "Finland",
    "Poland",
    "India",
    "Pakistan",
    "Bangladesh",
    "China",
    "Japan",
    "South Korea",
    "Singapore",
    "Malaysia",
    "Indonesia",
    "Philippines",
    "Vietnam",
    "Australia",
    "New Zealand",
    "Nigeria",
    "Kenya",
    "South Africa",
    "Egypt",
    "Israel",
    "United Arab Emirates",
    // US states
    "California",
    "Texas",
    "New York",
    "Washington",
    "Florida",
    "Illinois",
    "Massachusetts",
    "Colorado",
    "Georgia",
    "Oregon",
    "Virginia",
    "North Carolina",
    "Pennsylvania",
    "New Jersey",
    "Michigan",
    "Ohio",
    "Arizona",
    "Utah",
    "Minnesota",
    // cities
    "San Francisco",
    "Los Angeles",
    "San Diego",
    "San Jose",
    "Seattle",
    "Portland",
    "Austin",
    "Dallas",
    "Houston",
    "Chicago",
    "Boston",
    "Denver",
    "Atlanta",
    "Miami",
    "Toronto",
    "Vancouver",
    "Montreal",
    "London",
    "Manchester",
    "Dublin",
    "Paris",
    "Berlin",
    "Munich",
    "Amsterdam",
    "Madrid",
    "Barcelona",
    "Lisbon",
    "Stockholm",
    "Zurich",
    "Warsaw",
    "Bangalore",
    "Bengaluru",
    "Mumbai",
    "Delhi",
    "New Delhi",
    "Hyderabad",
    "Chennai",
    "Pune",
    "Tokyo",
    "Osaka",
    "Seoul",
    "Beijing",
    "Shanghai",
    "Shenzhen",
    "Hong Kong",
    "Sydney",
    "Melbourne",
    "Lagos",
    "Nairobi",
    "Cairo",
    "Dubai",
    "Tel Aviv",
    "Manila",
    "Jakarta",
    "Kuala Lumpur",
];

/// Lowercased words that rule a line out as a personal name.
const NON_NAME_WORDS: &[&str] = &[
    "resume",
    "résumé",
    "curriculum",
    "vitae",
    "cv",
    "profile",
    "summary",
    "objective",
    "contact",
    "references",
    "engineer",
    "developer",
    "manager",
    "designer",
    "analyst",
    "scientist",
    "consultant",
    "architect",
    "intern",
    "senior",
    "junior",
    "lead",
    "software",
    "data",
    "university",
    "college",
    "institute",
    "school",
    "street",
    "avenue",
    "road",
    "inc",
    "llc",
    "ltd",
    "corp",
];

static DEFAULT_PLACES: LazyLock<Regex> = LazyLock::new(|| {
    build_place_pattern(PLACES.iter().copied()).expect("valid gazetteer pattern")
});

fn build_place_pattern<'a>(places: impl Iterator<Item = &'a str>) -> Result<Regex, regex::Error> {
    let mut places: Vec<&str> = places.collect();
    // Longest first so "New York" wins over "York"-like prefixes in the alternation.
    places.sort_by_key(|p| std::cmp::Reverse(p.len()));
    let alternation = places
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
}

/// Rule-based recogniser: gazetteer lookups for GPE, word-shape rules for PERSON.
/// A text that is exactly a known place is never tagged as a person.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    places: Regex,
}

impl GazetteerRecognizer {
    pub fn new() -> Self {
        Self {
            places: DEFAULT_PLACES.clone(),
        }
    }

    /// Recogniser over a custom place list.
    pub fn with_places<'a>(places: impl IntoIterator<Item = &'a str>) -> Result<Self, regex::Error> {
        Ok(Self {
            places: build_place_pattern(places.into_iter())?,
        })
    }

    /// Place matches, skipping those embedded in an address or URL token.
    fn places_in(&self, text: &str) -> Vec<EntitySpan> {
        let glued = |c: Option<char>| matches!(c, Some('@' | '.' | '/'));
        self.places
            .find_iter(text)
            .filter(|m| {
                let before = text[..m.start()].chars().next_back();
                let after = text[m.end()..].chars().next();
                !glued(before) && !glued(after)
            })
            .map(|m| EntitySpan {
                label: EntityLabel::Gpe,
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let places = self.places_in(text);
        if only_places(text, &places) {
            return places;
        }
        // A name-shaped line that merely contains a place ("Austin Miller") is a person.
        match person_span(text) {
            Some(person) => vec![person],
            None => places,
        }
    }
}

/// True when every alphanumeric character of `text` lies inside a place span.
fn only_places(text: &str, places: &[EntitySpan]) -> bool {
    let mut cursor = 0;
    for place in places {
        if text[cursor..place.start].chars().any(char::is_alphanumeric) {
            return false;
        }
        cursor = place.end;
    }
    !places.is_empty() && !text[cursor..].chars().any(char::is_alphanumeric)
}

/// 2–4 capitalised alphabetic words, none of them a résumé keyword.
fn person_span(text: &str) -> Option<EntitySpan> {
    let trimmed = text.trim();
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return None;
    }

    let looks_like_name = words.iter().all(|word| {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        let name_chars = word
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '.' | '\'' | '-'));
        let bare = word.trim_matches('.').to_lowercase();
        starts_upper && name_chars && !NON_NAME_WORDS.contains(&bare.as_str())
    });
    if !looks_like_name {
        return None;
    }

    let start = text.len() - text.trim_start().len();
    Some(EntitySpan {
        label: EntityLabel::Person,
        text: trimmed.to_string(),
        start,
        end: start + trimmed.len(),
    })
}
