//! Reconciliation of a parsed option with reference and content scoring

use crate::schema::{ResearchOption, MAX_MATCH_SCORE, MIN_MATCH_SCORE};
use crate::scoring::content::estimate_match_score;
use crate::scoring::references::validate_references;
use tracing::debug;

/// Largest tolerated gap between the parsed and estimated match scores.
///
/// Business rule: when the two diverge by more than this, the content
/// estimate replaces the parsed score; the parsed score never overrides the
/// estimate.
pub const SCORE_DIVERGENCE_THRESHOLD: u32 = 15;

/// Rationale note summarizing reference validation problems
pub fn reference_quality_note(issue_count: usize, quality_score: u32) -> String {
    format!(
        "参考文献验证: 发现{}个问题，质量评分{}/100",
        issue_count, quality_score
    )
}

/// Enrich a parsed option using the text of the block it came from.
///
/// Never fails: malformed references shrink the reference list instead.
pub fn enrich_option(
    mut option: ResearchOption,
    block_text: &str,
    user_courses: &str,
    user_extracurricular: &str,
) -> ResearchOption {
    let report = validate_references(&option.references);
    let estimated = estimate_match_score(block_text, user_courses, user_extracurricular);

    if option.match_score.abs_diff(estimated) > SCORE_DIVERGENCE_THRESHOLD {
        debug!(
            "Match score for '{}' diverges ({} parsed, {} estimated), using estimate",
            option.title, option.match_score, estimated
        );
        option.match_score = estimated;
    }
    option.match_score = option.match_score.clamp(MIN_MATCH_SCORE, MAX_MATCH_SCORE);

    option.references = report.accepted;

    if !report.issues.is_empty() {
        debug!(
            "'{}' has {} reference issues: {:?}",
            option.title,
            report.issues.len(),
            report.issues
        );
        option
            .reasoning
            .push(reference_quality_note(report.issues.len(), report.score));
    }

    option
}
