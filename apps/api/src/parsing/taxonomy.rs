//! Taxonomy Matcher — maps a candidate header line onto one of the four
//! canonical body categories.
//!
//! Step 1 is an exact whole-word search for the category names themselves.
//! Step 2 (only when step 1 finds nothing) is a fuzzy Ratcliff/Obershelp scan
//! over every synonym in the taxonomy.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parsing::similarity::ratio;

/// Acceptance threshold for direct calls to [`normalize_header`].
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Canonical résumé body categories. Every body section lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Experience,
    Education,
    Skills,
    Others,
}

impl Category {
    /// Scan order for exact matching.
    pub const ALL: [Category; 4] = [
        Category::Experience,
        Category::Education,
        Category::Skills,
        Category::Others,
    ];

    /// Lowercase key, also the literal searched for in step 1.
    pub fn key(self) -> &'static str {
        match self {
            Category::Experience => "experience",
            Category::Education => "education",
            Category::Skills => "skills",
            Category::Others => "others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

static CATEGORY_PATTERNS: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    Category::ALL
        .iter()
        .map(|&cat| {
            let pattern = format!(r"\b{}\b", regex::escape(cat.key()));
            (cat, Regex::new(&pattern).expect("valid category pattern"))
        })
        .collect()
});

const ENGLISH_SYNONYMS: &[(Category, &[&str])] = &[
    (
        Category::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment history",
            "career history",
            "jobs",
            "work history",
        ],
    ),
    (
        Category::Education,
        &[
            "education",
            "academic background",
            "educational background",
            "qualifications",
            "academic qualifications",
            "education & professional credentials",
        ],
    ),
    (
        Category::Skills,
        &[
            "skills",
            "technical skills",
            "proficiencies",
            "expertise",
            "competencies",
            "skill set",
        ],
    ),
    (
        Category::Others,
        &[
            "professional certification",
            "certifications",
            "certificates",
            "hackathons",
            "awards",
        ],
    ),
];

/// Fixed mapping of categories to recognised header phrases, flattened into
/// scan order. Synonyms are stored lowercase.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    synonyms: Vec<(String, Category)>,
    max_words: usize,
}

impl Taxonomy {
    pub fn new<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, &'a str)>,
    {
        let synonyms: Vec<(String, Category)> = entries
            .into_iter()
            .map(|(cat, syn)| (syn.to_lowercase(), cat))
            .collect();
        let max_words = synonyms
            .iter()
            .map(|(syn, _)| syn.split_whitespace().count())
            .max()
            .unwrap_or(0);
        Self {
            synonyms,
            max_words,
        }
    }

    /// The built-in English résumé taxonomy.
    pub fn english() -> Self {
        Self::new(
            ENGLISH_SYNONYMS
                .iter()
                .flat_map(|(cat, syns)| syns.iter().map(move |s| (*cat, *s))),
        )
    }

    /// Word count of the longest synonym phrase; longer lines are never headers.
    pub fn max_header_words(&self) -> usize {
        self.max_words
    }

    pub fn synonyms(&self) -> impl Iterator<Item = (&str, Category)> {
        self.synonyms.iter().map(|(syn, cat)| (syn.as_str(), *cat))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::english()
    }
}

/// Outcome of [`normalize_header`]. `score` is the best score seen even when
/// `category` is `None`, so callers can apply their own gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderMatch {
    pub category: Option<Category>,
    pub score: f64,
}

/// Resolves `line` to a category.
///
/// An exact, case-insensitive whole-word hit on a category name returns
/// confidence 1.0 without looking at synonyms. Otherwise the first synonym
/// with the highest similarity wins if it reaches `threshold`.
pub fn normalize_header(line: &str, taxonomy: &Taxonomy, threshold: f64) -> HeaderMatch {
    let lowered = line.to_lowercase();

    if let Some((cat, _)) = CATEGORY_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(&lowered))
    {
        return HeaderMatch {
            category: Some(*cat),
            score: 1.0,
        };
    }

    let mut best: Option<Category> = None;
    let mut best_score = 0.0_f64;
    for (syn, cat) in taxonomy.synonyms() {
        let score = ratio(&lowered, syn);
        if score > best_score {
            best = Some(cat);
            best_score = score;
        }
    }

    HeaderMatch {
        category: if best_score >= threshold { best } else { None },
        score: best_score,
    }
}
