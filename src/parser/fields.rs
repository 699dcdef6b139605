//! Field extraction inside a single domain block

use crate::error::{excerpt, FieldError};
use regex::Regex;
use std::sync::OnceLock;

/// Score assumed when a block carries no match-score label
pub const DEFAULT_MATCH_SCORE: u32 = 85;

/// Summary used when a block has no usable content line at all
pub const DEFAULT_SUMMARY: &str = "通过硕士学习专业知识来应对行业挑战";

/// Rationale used when a block has no detailed-reasoning section
pub const DEFAULT_REASONING: [&str; 2] = [
    "行业趋势分析显示该领域有快速增长",
    "申请者的经历与领域需求高度匹配",
];

pub const SCORE_LABEL: &str = "匹配度";
pub const SUMMARY_LABEL: &str = "一句话总结";
pub const LOOSE_SUMMARY_LABEL: &str = "总结";
pub const REASONING_LABEL: &str = "详细理由";
pub const REFERENCES_LABEL: &str = "参考文献";

/// Sub-labels that open a new rationale item
pub const RATIONALE_LABELS: [&str; 4] = ["趋势分析", "痛点识别", "机会点", "技能匹配"];

const SUMMARY_MAX_CHARS: usize = 200;

fn inline_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"匹配度[:：]\s*(\d+)\s*[%％]").expect("score regex must compile"))
}

fn spaced_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"匹配度\s*(\d+)\s*[%％]").expect("score regex must compile"))
}

fn numbered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "1. " starts a list item; "2.5倍" is a decimal, not a marker
    RE.get_or_init(|| Regex::new(r"^\d+\.(?:\s|$|\D)").expect("numbered item regex must compile"))
}

fn list_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:\d+\.\s*|[-*•]\s*)").expect("list marker regex must compile"))
}

/// Text following `label` and a colon (ASCII or full-width) anywhere in `line`
pub fn after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.match_indices(label).find_map(|(pos, _)| {
        let rest = &line[pos + label.len()..];
        rest.strip_prefix(':').or_else(|| rest.strip_prefix('：'))
    })
}

/// Drop leading bullet markers and surrounding whitespace
pub fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| matches!(c, '•' | '·' | '●' | '-' | '*'))
        .trim()
}

/// Match score from the first label layout that matches, else the default
pub fn extract_match_score(text: &str) -> Result<u32, FieldError> {
    for pattern in [inline_score_re(), spaced_score_re()] {
        if let Some(digits) = pattern.captures(text).and_then(|caps| caps.get(1)) {
            return digits
                .as_str()
                .parse::<u32>()
                .map_err(|_| FieldError::InvalidScore(digits.as_str().to_string()));
        }
    }
    Ok(DEFAULT_MATCH_SCORE)
}

/// One-line summary, falling back through looser heuristics
pub fn extract_summary(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    labeled_summary(&lines)
        .or_else(|| loose_summary(&lines))
        .or_else(|| first_content_line(&lines))
        .unwrap_or_else(|| DEFAULT_SUMMARY.to_string())
}

fn labeled_summary(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        let Some(rest) = after_label(line, SUMMARY_LABEL) else {
            continue;
        };

        let inline = strip_bullet(rest);
        if !inline.is_empty() {
            return Some(inline.to_string());
        }

        let next = lines[i + 1..]
            .iter()
            .map(|l| strip_bullet(l))
            .find(|l| !l.is_empty());
        if let Some(next) = next.filter(|l| !is_section_heading(l)) {
            return Some(next.to_string());
        }
    }
    None
}

/// Whether `line` opens another section or domain instead of carrying content
fn is_section_heading(line: &str) -> bool {
    let line = line.trim();
    line.contains(SCORE_LABEL)
        || line.starts_with("【细分领域")
        || line.starts_with("细分领域")
        || [SUMMARY_LABEL, LOOSE_SUMMARY_LABEL, REASONING_LABEL, REFERENCES_LABEL]
            .iter()
            .any(|label| line.starts_with(label) || after_label(line, label).is_some())
}

fn loose_summary(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter(|line| !line.contains(REASONING_LABEL))
        .filter_map(|line| after_label(line, LOOSE_SUMMARY_LABEL))
        .map(strip_bullet)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_content_line(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && !is_section_heading(line))
        .map(|line| excerpt(strip_bullet(line), SUMMARY_MAX_CHARS))
        .filter(|line| !line.is_empty())
}

/// Rationale items of the detailed-reasoning section
pub fn extract_reasoning(text: &str) -> Vec<String> {
    let mut reasoning = Vec::new();
    let mut in_reasoning = false;
    let mut current = String::new();

    for line in text.lines() {
        let stripped = line.trim();

        if !in_reasoning {
            if let Some(rest) = after_label(stripped, REASONING_LABEL) {
                in_reasoning = true;
                current = strip_bullet(rest).to_string();
            }
            continue;
        }

        if stripped.starts_with(REFERENCES_LABEL)
            || after_label(stripped, REFERENCES_LABEL).is_some()
            || numbered_item_re().is_match(stripped)
        {
            break;
        }

        let item = strip_bullet(stripped);
        if RATIONALE_LABELS
            .iter()
            .any(|label| after_label(item, label).is_some())
        {
            if !current.is_empty() {
                reasoning.push(std::mem::take(&mut current));
            }
            current = item.to_string();
        } else if !item.is_empty() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(item);
        }
    }

    if !current.is_empty() {
        reasoning.push(current);
    }

    if reasoning.is_empty() {
        reasoning = DEFAULT_REASONING.iter().map(|s| s.to_string()).collect();
    }

    reasoning
}

/// Citation lines of the references section
pub fn extract_references(text: &str) -> Vec<String> {
    let mut references = Vec::new();
    let mut in_references = false;

    for line in text.lines() {
        let stripped = line.trim();

        if !in_references {
            in_references = after_label(stripped, REFERENCES_LABEL).is_some();
            continue;
        }

        if stripped.starts_with("【细分领域") || stripped.starts_with("细分领域") {
            break;
        }
        if stripped.is_empty() {
            continue;
        }

        if let Some(marker) = list_marker_re().find(stripped) {
            let reference = stripped[marker.end()..].trim();
            if !reference.is_empty() {
                references.push(reference.to_string());
            }
        } else if references.is_empty() {
            references.push(stripped.to_string());
        }
    }

    references
}
