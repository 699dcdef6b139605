//! Structural validation and quality scoring of citation strings

use chrono::{Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Ceiling of a single reference's score
pub const MAX_SCORE_PER_REFERENCE: u32 = 20;

const AUTHOR_POINTS: u32 = 3;
const YEAR_POINTS: u32 = 3;
const PLAUSIBLE_YEAR_POINTS: u32 = 2;
const RECENT_YEAR_POINTS: u32 = 5;
const TITLE_POINTS: u32 = 3;
const JOURNAL_POINTS: u32 = 2;
const AUTHORITY_POINTS: u32 = 5;
const LINK_POINTS: u32 = 4;

const EARLIEST_PLAUSIBLE_YEAR: i32 = 1900;
const RECENT_YEAR: i32 = 2020;

/// Journal or proceedings keywords
pub const JOURNAL_KEYWORDS: [&str; 5] = [
    "Journal",
    "Proceedings",
    "Conference",
    "Symposium",
    "Transactions",
];

/// Top journals, publishers, standards bodies, consultancies and international organizations
pub const AUTHORITATIVE_SOURCES: [&str; 22] = [
    "Nature", "Science", "Cell", "Lancet", "NEJM", "JAMA", "IEEE", "ACM", "Springer", "Elsevier",
    "Wiley", "Gartner", "IDC", "McKinsey", "BCG", "Deloitte", "WHO", "UNESCO", "World Bank", "IMF",
    "UN", "WTO",
];

fn author_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z][a-z]+,\s*[A-Z]\.").expect("author regex must compile"))
}

fn parenthesized_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\d{4})\)").expect("year regex must compile"))
}

fn bare_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Digit boundaries only: Han characters count as word characters for `\b`
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^0-9])((?:19|20)\d{2})(?:[^0-9]|$)").expect("year regex must compile")
    })
}

fn authority_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternatives = AUTHORITATIVE_SOURCES
            .iter()
            .map(|source| regex::escape(source))
            .collect::<Vec<_>>()
            .join("|");
        // ASCII-letter boundaries, so "Nature杂志" matches but "University" is not the UN
        Regex::new(&format!(r"(?i)(?:^|[^A-Za-z])(?:{})(?:[^A-Za-z]|$)", alternatives))
            .expect("authority regex must compile")
    })
}

/// Why a single reference was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceProblem {
    MissingAuthor,
    MissingYear,
    ImplausibleYear(i32),
    MissingTitle,
}

impl fmt::Display for ReferenceProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceProblem::MissingAuthor => write!(f, "missing author"),
            ReferenceProblem::MissingYear => write!(f, "missing year"),
            ReferenceProblem::ImplausibleYear(year) => write!(f, "implausible year {}", year),
            ReferenceProblem::MissingTitle => write!(f, "missing title marker"),
        }
    }
}

/// A reported validation problem; never aborts parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssue {
    /// The reference list was empty
    NoReferences,
    /// Reference at `index` (1-based) was blank
    Blank { index: usize },
    /// Reference at `index` (1-based) failed one or more mandatory checks
    Rejected {
        index: usize,
        reference: String,
        problems: Vec<ReferenceProblem>,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::NoReferences => write!(f, "no references"),
            ValidationIssue::Blank { index } => write!(f, "reference {}: blank", index),
            ValidationIssue::Rejected {
                index,
                reference,
                problems,
            } => {
                let problems: Vec<String> = problems.iter().map(|p| p.to_string()).collect();
                write!(f, "reference {}: {} - {}", index, reference, problems.join(", "))
            }
        }
    }
}

/// Outcome of checking one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceAssessment {
    /// Points earned, capped at [`MAX_SCORE_PER_REFERENCE`]
    pub score: u32,
    /// Mandatory checks that failed; empty means accepted
    pub problems: Vec<ReferenceProblem>,
}

impl ReferenceAssessment {
    pub fn is_accepted(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Outcome of checking a reference list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceReport {
    /// References that passed every mandatory check, in input order
    pub accepted: Vec<String>,
    /// Mean accepted-reference score rescaled to 0-100
    pub score: u32,
    /// One issue per rejected reference, or one for an empty list
    pub issues: Vec<ValidationIssue>,
}

fn find_year(reference: &str) -> Option<i32> {
    parenthesized_year_re()
        .captures(reference)
        .or_else(|| bare_year_re().captures(reference))
        .and_then(|caps| caps.get(1))
        .and_then(|year| year.as_str().parse().ok())
}

fn has_title_marker(reference: &str) -> bool {
    reference.contains('"')
        || reference.contains('“')
        || reference.contains('”')
        || (reference.contains('[') && reference.contains(']'))
}

fn has_link(reference: &str) -> bool {
    let lower = reference.to_lowercase();
    let head: String = reference.chars().take(20).collect();

    lower.contains("doi:")
        || lower.contains("doi.org")
        || head.contains("10.")
        || lower.contains("http://")
        || lower.contains("https://")
}

/// Check a single reference against the structural rules as of `current_year`
pub fn assess_reference(reference: &str, current_year: i32) -> ReferenceAssessment {
    let mut score = 0;
    let mut problems = Vec::new();

    if author_re().is_match(reference) || reference.contains("et al.") {
        score += AUTHOR_POINTS;
    } else {
        problems.push(ReferenceProblem::MissingAuthor);
    }

    match find_year(reference) {
        Some(year) => {
            score += YEAR_POINTS;
            if (EARLIEST_PLAUSIBLE_YEAR..=current_year).contains(&year) {
                score += PLAUSIBLE_YEAR_POINTS;
                if year >= RECENT_YEAR {
                    score += RECENT_YEAR_POINTS;
                }
            } else {
                problems.push(ReferenceProblem::ImplausibleYear(year));
            }
        }
        None => problems.push(ReferenceProblem::MissingYear),
    }

    if has_title_marker(reference) {
        score += TITLE_POINTS;
    } else {
        problems.push(ReferenceProblem::MissingTitle);
    }

    if JOURNAL_KEYWORDS.iter().any(|k| reference.contains(*k)) {
        score += JOURNAL_POINTS;
    }
    if authority_re().is_match(reference) {
        score += AUTHORITY_POINTS;
    }
    if has_link(reference) {
        score += LINK_POINTS;
    }

    ReferenceAssessment {
        score: score.min(MAX_SCORE_PER_REFERENCE),
        problems,
    }
}

/// Validate and score references relative to the current calendar year
pub fn validate_references(references: &[String]) -> ReferenceReport {
    validate_references_as_of(references, Utc::now().year())
}

/// Validate and score references relative to `current_year`
pub fn validate_references_as_of(references: &[String], current_year: i32) -> ReferenceReport {
    if references.is_empty() {
        return ReferenceReport {
            issues: vec![ValidationIssue::NoReferences],
            ..Default::default()
        };
    }

    let mut report = ReferenceReport::default();
    let mut total = 0;

    for (i, reference) in references.iter().enumerate() {
        let index = i + 1;
        let reference = reference.trim();

        if reference.is_empty() {
            report.issues.push(ValidationIssue::Blank { index });
            continue;
        }

        let assessment = assess_reference(reference, current_year);
        if assessment.is_accepted() {
            total += assessment.score;
            report.accepted.push(reference.to_string());
        } else {
            report.issues.push(ValidationIssue::Rejected {
                index,
                reference: reference.to_string(),
                problems: assessment.problems,
            });
        }
    }

    if !report.accepted.is_empty() {
        // mean of 0-20 scores, rescaled to 0-100
        report.score = total * 100 / (MAX_SCORE_PER_REFERENCE * report.accepted.len() as u32);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2025;

    #[test]
    fn test_complete_reference_is_capped() {
        let assessment = assess_reference(
            "Smith, J. (2023). \"Responsible AI\", Nature, doi:10.1038/s41586",
            YEAR,
        );
        assert!(assessment.is_accepted());
        assert_eq!(assessment.score, MAX_SCORE_PER_REFERENCE);
    }

    #[test]
    fn test_authority_and_doi_score_higher() {
        let plain = assess_reference("Smith, J. (2015). \"Title\", Some Review", YEAR);
        let rich = assess_reference("Smith, J. (2015). \"Title\", Nature, doi:10.1/abc", YEAR);

        assert!(plain.is_accepted());
        assert!(rich.is_accepted());
        assert!(rich.score > plain.score);
        assert_eq!(plain.score, 11);
    }

    #[test]
    fn test_missing_year_rejected() {
        let assessment = assess_reference("Smith, J. \"Title\", Nature", YEAR);
        assert_eq!(assessment.problems, vec![ReferenceProblem::MissingYear]);
    }

    #[test]
    fn test_implausible_year_rejected() {
        let assessment = assess_reference("Smith, J. (2099). \"Future\"", YEAR);
        assert_eq!(assessment.problems, vec![ReferenceProblem::ImplausibleYear(2099)]);

        let assessment = assess_reference("Smith, J. (1850). \"Past\"", YEAR);
        assert_eq!(assessment.problems, vec![ReferenceProblem::ImplausibleYear(1850)]);
    }

    #[test]
    fn test_bare_year_and_et_al() {
        let assessment = assess_reference("Zhang et al. 2021 [Survey of LLMs] Journal of AI", YEAR);
        assert!(assessment.is_accepted());
        // author 3 + year 3 + plausible 2 + recent 5 + title 3 + journal 2
        assert_eq!(assessment.score, 18);
    }

    #[test]
    fn test_short_acronyms_need_word_boundaries() {
        // "Foundation" contains "un" but is not the UN
        let assessment = assess_reference("Doe, J. (2010). \"Report\", Open Foundation", YEAR);
        assert_eq!(assessment.score, 3 + 3 + 2 + 3);

        let assessment = assess_reference("Doe, J. (2010). \"Report\", UN Habitat", YEAR);
        assert_eq!(assessment.score, 3 + 3 + 2 + 3 + 5);
    }

    #[test]
    fn test_keywords_adjacent_to_han_text() {
        let plain = assess_reference("Smith, J. (2015). \"Title\", Nature", YEAR);
        let embedded = assess_reference("Smith, J. (2015). \"Title\", 发表于Nature杂志", YEAR);
        assert_eq!(embedded.score, plain.score);

        let assessment = assess_reference("Wang, L. \"智能制造\", IEEE期刊, 2015年", YEAR);
        assert!(assessment.is_accepted());
        assert_eq!(assessment.score, 3 + 3 + 2 + 3 + 5);

        let assessment = assess_reference("Doe, J. (2010). \"Report\", University Press", YEAR);
        assert_eq!(assessment.score, 3 + 3 + 2 + 3);
    }

    #[test]
    fn test_report_aggregates_accepted_only() {
        let references = vec![
            "Smith, J. (2023). \"A\", Nature, doi:10.1/x".to_string(),
            "Lee, K. (2015). \"B\", Some Review".to_string(),
            "no author, no year".to_string(),
            "   ".to_string(),
        ];
        let report = validate_references_as_of(&references, YEAR);

        assert_eq!(report.accepted.len(), 2);
        // (20 + 11) / 2 = 15.5 of 20 -> 77
        assert_eq!(report.score, 77);
        assert_eq!(report.issues.len(), 2);
        assert!(matches!(report.issues[0], ValidationIssue::Rejected { index: 3, .. }));
        assert_eq!(report.issues[1], ValidationIssue::Blank { index: 4 });
    }

    #[test]
    fn test_empty_and_all_rejected() {
        let report = validate_references_as_of(&[], YEAR);
        assert_eq!(report.score, 0);
        assert_eq!(report.issues, vec![ValidationIssue::NoReferences]);

        let report = validate_references_as_of(&["nothing useful".to_string()], YEAR);
        assert!(report.accepted.is_empty());
        assert_eq!(report.score, 0);
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::Rejected {
            index: 2,
            reference: "x".to_string(),
            problems: vec![ReferenceProblem::MissingAuthor, ReferenceProblem::MissingYear],
        };
        assert_eq!(issue.to_string(), "reference 2: x - missing author, missing year");
    }
}
