//! # Research Options (research-options)
//!
//! Turns the free text of a generated research-direction proposal into three
//! validated, scored research options, caches the result per request, and
//! tracks which option a user selects.
//!
//! ## Features
//!
//! - Tolerant block parser for bracketed and plain domain markers
//! - Reference validation with a 0-100 quality score
//! - Content-based match-score estimation that corrects outlying scores
//! - Five-paragraph normalization of composition text
//! - Content-addressed result cache with TTL and least-used eviction
//! - Short-lived selection sessions
//! - Async-first design using tokio
//!
//! ## Parsing
//!
//! Parsing is a pure function of the generated text:
//!
//! ```rust
//! use research_options::parser::{parse_and_enrich, split_paragraphs};
//!
//! let text = "\
//! 【细分领域1: 人工智能伦理】\n匹配度: 90%\n一句话总结:\n研究算法公平\n\n\
//! 【细分领域2: 数据治理】\n匹配度: 85%\n一句话总结:\n研究数据标准\n\n\
//! 【细分领域3: 智慧医疗】\n匹配度: 80%\n一句话总结:\n研究临床决策\n";
//!
//! let options = parse_and_enrich(text, "机器学习", "数据竞赛").unwrap();
//! assert_eq!(options.len(), 3);
//! assert!(options.iter().all(|o| o.has_valid_score()));
//!
//! assert_eq!(split_paragraphs("one\n\ntwo").len(), 5);
//! ```
//!
//! ## Research Service
//!
//! [`ResearchService`] composes a [`TextGenerator`], the [`ResearchCache`]
//! and the [`SelectionStore`]:
//!
//! ```no_run
//! use research_options::{
//!     ResearchCache, ResearchRequest, ResearchService, RetryingGenerator, SelectionStore,
//!     Settings, TextGenerator, UpstreamError,
//! };
//! use std::sync::Arc;
//!
//! struct MyModel;
//!
//! #[async_trait::async_trait]
//! impl TextGenerator for MyModel {
//!     async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
//!         unimplemented!("call your provider with {prompt}")
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let service = ResearchService::new(
//!         Arc::new(RetryingGenerator::new(MyModel, settings.retry_policy())),
//!         Arc::new(ResearchCache::new(settings.cache_config())),
//!         Arc::new(SelectionStore::new(settings.session_config())),
//!     );
//!
//!     let request = ResearchRequest::new("MIT", "Computer Science", "Algorithms", "Robotics");
//!     let outcome = service.research(&request, "...prompt...").await?;
//!     let selection = service.select(&outcome.session_id, 0).await?;
//!     println!("Selected {}", selection.selected().map(|o| o.title.as_str()).unwrap_or(""));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod generation;
pub mod parser;
pub mod schema;
pub mod scoring;
pub mod service;
pub mod session;
pub mod settings;

// Re-export main types for convenience
pub use cache::{CacheConfig, CacheConfigBuilder, CacheKey, CacheStats, ResearchCache};
pub use error::{FieldError, ParseError, ResearchError, Result, UpstreamError};
pub use generation::{RetryPolicy, RetryingGenerator, TextGenerator};
pub use parser::{parse_and_enrich, parse_research_options, parse_with_domain_blocks, split_paragraphs};
pub use schema::{DomainBlock, PersonalStatement, ResearchOption, ResearchRequest, UserSelection};
pub use scoring::{ReferenceReport, ValidationIssue};
pub use service::{ResearchOutcome, ResearchService};
pub use session::{SelectionStore, SessionConfig};
pub use settings::Settings;
