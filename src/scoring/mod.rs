//! # Heuristic Scoring
//!
//! - [`references`]: structural validation and quality scoring of citations
//! - [`content`]: match-score estimation from a domain block's text
//! - [`enrich`]: reconciliation of a parsed option with both scores

pub mod content;
pub mod enrich;
pub mod references;

pub use content::{estimate_match_score, score_content, ContentScore};
pub use enrich::{enrich_option, SCORE_DIVERGENCE_THRESHOLD};
pub use references::{
    assess_reference, validate_references, validate_references_as_of, ReferenceAssessment,
    ReferenceProblem, ReferenceReport, ValidationIssue,
};
