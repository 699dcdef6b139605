//! Content-based match-score estimation for a domain block

use crate::schema::{MAX_MATCH_SCORE, MIN_MATCH_SCORE};

/// Topical keywords counted once each
pub const TOPIC_KEYWORDS: [&str; 14] = [
    "前沿",
    "趋势",
    "技术",
    "创新",
    "发展",
    "应用",
    "人工智能",
    "机器学习",
    "大数据",
    "云计算",
    "物联网",
    "可持续发展",
    "数字化转型",
    "智能化",
];

/// Section labels a complete block carries
pub const STRUCTURE_SECTIONS: [&str; 5] = ["趋势分析", "痛点识别", "机会点", "技能匹配", "参考文献"];

const MAX_KEYWORD_BONUS: u32 = 10;
const POINTS_PER_SECTION: u32 = 2;

/// Additive parts of a content score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentScore {
    pub keyword_bonus: u32,
    pub length_bonus: u32,
    pub structure_bonus: u32,
}

impl ContentScore {
    /// Base score plus every bonus, clamped into the match-score range
    pub fn total(&self) -> u32 {
        (MIN_MATCH_SCORE + self.keyword_bonus + self.length_bonus + self.structure_bonus)
            .clamp(MIN_MATCH_SCORE, MAX_MATCH_SCORE)
    }
}

fn length_bonus(char_count: usize) -> u32 {
    match char_count {
        n if n > 500 => 10,
        n if n > 300 => 5,
        n if n > 100 => 2,
        _ => 0,
    }
}

/// Score breakdown for one domain's text
pub fn score_content(domain_text: &str) -> ContentScore {
    let keywords = TOPIC_KEYWORDS
        .iter()
        .filter(|keyword| domain_text.contains(**keyword))
        .count() as u32;

    let sections = STRUCTURE_SECTIONS
        .iter()
        .filter(|section| domain_text.contains(**section))
        .count() as u32;

    ContentScore {
        keyword_bonus: keywords.min(MAX_KEYWORD_BONUS),
        length_bonus: length_bonus(domain_text.chars().count()),
        structure_bonus: sections * POINTS_PER_SECTION,
    }
}

/// Estimate a match score in [70, 100] from the richness of `domain_text`.
///
/// The user's course and extracurricular text are accepted for future
/// personalization and do not affect the score yet.
pub fn estimate_match_score(
    domain_text: &str,
    _user_courses: &str,
    _user_extracurricular: &str,
) -> u32 {
    score_content(domain_text).total()
}
