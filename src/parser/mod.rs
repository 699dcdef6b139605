//! # Response Parsing
//!
//! Turns the free-form text of a research generation into structured
//! [`ResearchOption`] records, and a composition response into paragraphs.
//!
//! Parsing is pure: text in, records out, no shared state. The pipeline is
//!
//! ```text
//! raw text → domain markers → DomainBlock ×3 → field extraction → enrichment
//! ```
//!
//! ## Example
//!
//! ```rust
//! use research_options::parser::parse_and_enrich;
//!
//! let block = |n: u32, name: &str| format!(
//!     "【细分领域{n}: {name}】\n一句话总结:\n测试总结\n详细理由:\n趋势分析: 测试\n参考文献:\n1. Smith, J. (2023). \"Title\", Nature\n"
//! );
//! let text = format!("{}{}{}", block(1, "人工智能伦理"), block(2, "数据治理"), block(3, "智慧医疗"));
//!
//! let options = parse_and_enrich(&text, "", "").unwrap();
//! assert_eq!(options.len(), 3);
//! assert_eq!(options[0].title, "人工智能伦理");
//! ```

pub mod blocks;
pub mod fields;
pub mod paragraphs;

pub use blocks::{find_domain_markers, split_domain_blocks, DomainMarker, MarkerStyle};
pub use paragraphs::{split_paragraphs, PARAGRAPH_COUNT};

use crate::error::{excerpt, FieldError, ParseError};
use crate::schema::{DomainBlock, ResearchOption};
use crate::scoring::enrich_option;
use tracing::debug;

/// Characters of a block kept in a `ParseError::Block`
const BLOCK_EXCERPT_CHARS: usize = 200;

/// Extract the fields of one block into a not-yet-enriched option
pub fn parse_block(block: &DomainBlock) -> Result<ResearchOption, FieldError> {
    if block.title.trim().is_empty() {
        return Err(FieldError::EmptyTitle);
    }

    Ok(ResearchOption {
        title: block.title.trim().to_string(),
        match_score: fields::extract_match_score(&block.text)?,
        summary: fields::extract_summary(&block.text),
        reasoning: fields::extract_reasoning(&block.text),
        references: fields::extract_references(&block.text),
    })
}

/// Parse a response into three options paired with the blocks they came from
pub fn parse_with_domain_blocks(
    text: &str,
) -> Result<Vec<(ResearchOption, DomainBlock)>, ParseError> {
    let blocks = split_domain_blocks(text)?;

    blocks
        .into_iter()
        .map(|block| match parse_block(&block) {
            Ok(option) => Ok((option, block)),
            Err(source) => Err(ParseError::Block {
                index: block.index,
                source,
                excerpt: excerpt(&block.text, BLOCK_EXCERPT_CHARS),
            }),
        })
        .collect()
}

/// Parse a response into three options without enrichment
pub fn parse_research_options(text: &str) -> Result<Vec<ResearchOption>, ParseError> {
    Ok(parse_with_domain_blocks(text)?
        .into_iter()
        .map(|(option, _)| option)
        .collect())
}

/// Parse a response and enrich every option with reference validation and
/// content-based score reconciliation
pub fn parse_and_enrich(
    text: &str,
    user_courses: &str,
    user_extracurricular: &str,
) -> Result<Vec<ResearchOption>, ParseError> {
    let parsed = parse_with_domain_blocks(text)?;
    debug!("Parsed {} research options, enriching", parsed.len());

    Ok(parsed
        .into_iter()
        .map(|(option, block)| {
            enrich_option(option, &block.text, user_courses, user_extracurricular)
        })
        .collect())
}
