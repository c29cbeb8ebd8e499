// Screening agents: job-description writer, candidate scoring and interview
// question generation on top of parsed résumé records.
// All model calls go through llm_client via the TextGenerator trait.

pub mod agents;
pub mod formatting;
pub mod handlers;
pub mod prompts;
