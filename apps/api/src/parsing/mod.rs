// Résumé parsing engine.
// Implements: fuzzy header normalisation, header/body segmentation, personal-info
// extraction, body compilation and the optional model-backed segmentation fallback.
// Model calls go through llm_client via the TextGenerator trait.

pub mod body;
pub mod entities;
pub mod fallback;
pub mod handlers;
pub mod pdf;
pub mod personal_info;
pub mod pipeline;
pub mod prompts;
pub mod segmenter;
pub mod similarity;
pub mod taxonomy;

// Re-export the public API consumed by other modules (main, routes).
pub use entities::GazetteerRecognizer;
pub use fallback::FallbackSegmenter;
pub use pipeline::ResumeParser;
pub use taxonomy::Taxonomy;
