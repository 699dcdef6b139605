//! Record types produced by the parsing pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest match score a research option can carry
pub const MIN_MATCH_SCORE: u32 = 70;

/// Highest match score a research option can carry
pub const MAX_MATCH_SCORE: u32 = 100;

/// Number of research options every generated response must describe
pub const OPTIONS_PER_RESPONSE: usize = 3;

/// One extracted research-direction record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchOption {
    /// Short label of the research domain
    pub title: String,
    /// Match score in [70, 100] once enriched
    pub match_score: u32,
    /// Single-sentence summary
    pub summary: String,
    /// Ordered, labeled rationale strings
    pub reasoning: Vec<String>,
    /// Ordered citation strings
    pub references: Vec<String>,
}

impl ResearchOption {
    /// Create a new research option
    pub fn new(
        title: impl Into<String>,
        match_score: u32,
        summary: impl Into<String>,
        reasoning: Vec<String>,
        references: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            match_score,
            summary: summary.into(),
            reasoning,
            references,
        }
    }

    /// Whether the match score lies inside the accepted domain range
    pub fn has_valid_score(&self) -> bool {
        (MIN_MATCH_SCORE..=MAX_MATCH_SCORE).contains(&self.match_score)
    }
}

/// The span of a response attributed to one research option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainBlock {
    /// 1-based position of the block in the response
    pub index: usize,
    /// Domain name captured from the marker
    pub title: String,
    /// Text between the end of this marker and the next marker (or end of text)
    pub text: String,
}

/// The four user inputs a research generation is keyed on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResearchRequest {
    /// Target school
    pub school: String,
    /// Target major
    pub major: String,
    /// Relevant course descriptions
    pub courses: String,
    /// Extracurricular experience descriptions
    pub extracurricular: String,
}

impl ResearchRequest {
    /// Create a new request
    pub fn new(
        school: impl Into<String>,
        major: impl Into<String>,
        courses: impl Into<String>,
        extracurricular: impl Into<String>,
    ) -> Self {
        Self {
            school: school.into(),
            major: major.into(),
            courses: courses.into(),
            extracurricular: extracurricular.into(),
        }
    }

    /// Copy with every field trimmed and whitespace runs collapsed to one space
    pub fn normalized(&self) -> Self {
        Self {
            school: normalize_field(&self.school),
            major: normalize_field(&self.major),
            courses: normalize_field(&self.courses),
            extracurricular: normalize_field(&self.extracurricular),
        }
    }
}

fn normalize_field(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A user's choice among the options of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelection {
    /// Index of the chosen option
    pub selection_index: usize,
    /// Full snapshot of the options offered
    pub research_options: Vec<ResearchOption>,
    /// When the selection was made
    pub timestamp: DateTime<Utc>,
}

impl UserSelection {
    /// The chosen option, if the index is in range
    pub fn selected(&self) -> Option<&ResearchOption> {
        self.research_options.get(self.selection_index)
    }
}

/// A five-paragraph composition generated for a selected option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalStatement {
    /// Exactly five normalized paragraphs
    pub paragraphs: Vec<String>,
    /// Title of the option the statement was written for
    pub selected_domain: String,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_normalization() {
        let request = ResearchRequest::new(
            "  MIT ",
            "Computer\tScience",
            "Algorithms,\n  Databases",
            "",
        );
        let normalized = request.normalized();

        assert_eq!(normalized.school, "MIT");
        assert_eq!(normalized.major, "Computer Science");
        assert_eq!(normalized.courses, "Algorithms, Databases");
        assert_eq!(normalized.extracurricular, "");
    }

    #[test]
    fn test_score_range() {
        let mut option = ResearchOption::new("AI", 85, "summary", vec![], vec![]);
        assert!(option.has_valid_score());

        option.match_score = 69;
        assert!(!option.has_valid_score());

        option.match_score = 101;
        assert!(!option.has_valid_score());
    }

    #[test]
    fn test_selected_option() {
        let options = vec![
            ResearchOption::new("A", 90, "a", vec![], vec![]),
            ResearchOption::new("B", 80, "b", vec![], vec![]),
        ];
        let selection = UserSelection {
            selection_index: 1,
            research_options: options,
            timestamp: Utc::now(),
        };
        assert_eq!(selection.selected().map(|o| o.title.as_str()), Some("B"));

        let out_of_range = UserSelection {
            selection_index: 5,
            ..selection
        };
        assert!(out_of_range.selected().is_none());
    }
}
