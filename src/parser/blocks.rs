//! Splitting a generated response into per-domain blocks
//!
//! Domain markers are located by an ordered chain of marker styles; the first
//! style that finds at least three markers wins. Each block runs from the end
//! of its marker to the start of the next marker, or to the end of the text.

use crate::error::{excerpt, ParseError};
use crate::schema::{DomainBlock, OPTIONS_PER_RESPONSE};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Characters of the response kept in an `InsufficientDomains` error
const RESPONSE_EXCERPT_CHARS: usize = 500;

fn bracketed_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"【细分领域(\d+)[:：]\s*([^】]+)】").expect("bracketed marker regex must compile")
    })
}

fn plain_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"细分领域(\d+)[:：]\s*([^\n]+)").expect("plain marker regex must compile")
    })
}

/// Layout of a domain marker line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// `【细分领域1: name】`
    Bracketed,
    /// `细分领域1: name` up to the end of the line
    Plain,
}

impl MarkerStyle {
    /// Styles in the order they are attempted
    pub const CHAIN: [MarkerStyle; 2] = [MarkerStyle::Bracketed, MarkerStyle::Plain];

    fn regex(self) -> &'static Regex {
        match self {
            MarkerStyle::Bracketed => bracketed_marker_re(),
            MarkerStyle::Plain => plain_marker_re(),
        }
    }

    /// Find every marker of this style in `text`
    pub fn find_markers(self, text: &str) -> Vec<DomainMarker> {
        self.regex()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(2)?;
                Some(DomainMarker {
                    title: name.as_str().trim().to_string(),
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect()
    }
}

/// A located domain marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMarker {
    /// Domain name, trimmed
    pub title: String,
    /// Byte offset where the marker starts
    pub start: usize,
    /// Byte offset where the marker ends (and its block begins)
    pub end: usize,
}

/// Locate markers with the first style in the chain that yields enough of them
pub fn find_domain_markers(text: &str) -> Result<Vec<DomainMarker>, ParseError> {
    let mut found = 0;

    for style in MarkerStyle::CHAIN {
        let markers = style.find_markers(text);
        found = markers.len();

        if markers.len() >= OPTIONS_PER_RESPONSE {
            debug!("Located {} domain markers with {:?} style", markers.len(), style);
            return Ok(markers);
        }
        debug!("{:?} style found only {} domain markers", style, markers.len());
    }

    Err(ParseError::InsufficientDomains {
        found,
        excerpt: excerpt(text, RESPONSE_EXCERPT_CHARS),
    })
}

/// Split a response into exactly three domain blocks
pub fn split_domain_blocks(text: &str) -> Result<Vec<DomainBlock>, ParseError> {
    let text = text.trim();
    let markers = find_domain_markers(text)?;

    if markers.len() != OPTIONS_PER_RESPONSE {
        return Err(ParseError::UnexpectedDomainCount {
            found: markers.len(),
        });
    }

    let blocks = markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start);
            DomainBlock {
                index: i + 1,
                title: marker.title.clone(),
                text: text[marker.end..end].to_string(),
            }
        })
        .collect();

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_markers() {
        let text = "【细分领域1: 人工智能伦理】 (匹配度: 92%)\nA\n【细分领域2: 数据治理】\nB\n【细分领域3：智慧医疗】\nC";
        let blocks = split_domain_blocks(text).unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].title, "人工智能伦理");
        assert_eq!(blocks[1].title, "数据治理");
        assert_eq!(blocks[2].title, "智慧医疗");
        assert_eq!(blocks[0].text, " (匹配度: 92%)\nA\n");
        assert_eq!(blocks[2].text, "\nC");
        assert_eq!(blocks[2].index, 3);
    }

    #[test]
    fn test_plain_marker_fallback() {
        let text = "细分领域1: 量子计算\n内容一\n细分领域2: 边缘计算\n内容二\n细分领域3: 隐私计算\n内容三";
        let blocks = split_domain_blocks(text).unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].title, "量子计算");
        assert_eq!(blocks[1].text, "\n内容二\n");
    }

    #[test]
    fn test_bracketed_preferred_over_plain() {
        let text = "【细分领域1: A】x\n【细分领域2: B】y\n【细分领域3: C】z";
        let markers = find_domain_markers(text).unwrap();
        assert_eq!(markers[0].title, "A");
    }

    #[test]
    fn test_insufficient_domains() {
        let text = "【细分领域1: 人工智能】\n内容\n【细分领域2: 数据科学】\n内容";
        let err = split_domain_blocks(text).unwrap_err();

        match err {
            ParseError::InsufficientDomains { found, excerpt } => {
                assert_eq!(found, 2);
                assert!(excerpt.starts_with("【细分领域1"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let text = "无标记".repeat(400);
        match split_domain_blocks(&text).unwrap_err() {
            ParseError::InsufficientDomains { excerpt, .. } => {
                assert_eq!(excerpt.chars().count(), 500);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_too_many_domains() {
        let text = "【细分领域1: A】\n【细分领域2: B】\n【细分领域3: C】\n【细分领域4: D】";
        assert_eq!(
            split_domain_blocks(text).unwrap_err(),
            ParseError::UnexpectedDomainCount { found: 4 }
        );
    }
}
