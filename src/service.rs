//! Research service tying generation, parsing, caching and selection together

use crate::cache::{CacheKey, ResearchCache};
use crate::error::{ResearchError, Result};
use crate::generation::TextGenerator;
use crate::parser::{parse_and_enrich, split_paragraphs};
use crate::schema::{PersonalStatement, ResearchOption, ResearchRequest, UserSelection};
use crate::session::SelectionStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a research request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchOutcome {
    /// Session the options can be selected from
    pub session_id: String,
    /// Cache key of the normalized request
    pub cache_key: CacheKey,
    pub options: Vec<ResearchOption>,
    /// Whether the options were served from the cache
    pub from_cache: bool,
}

/// Composition root of the research pipeline
///
/// All collaborators are shared handles, so a service can be cloned cheaply
/// and several services can share one cache.
#[derive(Clone)]
pub struct ResearchService {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResearchCache>,
    sessions: Arc<SelectionStore>,
}

impl ResearchService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResearchCache>,
        sessions: Arc<SelectionStore>,
    ) -> Self {
        Self {
            generator,
            cache,
            sessions,
        }
    }

    pub fn cache(&self) -> &ResearchCache {
        &self.cache
    }

    pub fn sessions(&self) -> &SelectionStore {
        &self.sessions
    }

    /// Produce three enriched options for `request` and open a selection
    /// session over them.
    ///
    /// A cached result for the normalized request skips generation. `prompt`
    /// is passed to the generator as is.
    pub async fn research(&self, request: &ResearchRequest, prompt: &str) -> Result<ResearchOutcome> {
        let request = request.normalized();
        let cache_key = ResearchCache::key_for(&request);

        let (options, from_cache) = match self.cache.lookup(&request).await {
            Some(options) => (options, true),
            None => {
                let text = self.generator.generate(prompt).await?;
                let options = parse_and_enrich(&text, &request.courses, &request.extracurricular)
                    .map_err(|e| {
                        warn!("Could not interpret generated research options: {}", e);
                        e
                    })?;
                self.cache.store(&request, &options).await;
                (options, false)
            }
        };

        let session_id = self.sessions.create(&options).await;
        info!(
            "Research {} ready in session {} (from cache: {})",
            cache_key, session_id, from_cache
        );

        Ok(ResearchOutcome {
            session_id,
            cache_key,
            options,
            from_cache,
        })
    }

    /// Record the user's choice of option `index` in a live session
    pub async fn select(&self, session_id: &str, index: usize) -> Result<UserSelection> {
        self.sessions
            .select(session_id, index)
            .await
            .ok_or_else(|| ResearchError::InvalidSelection {
                session_id: session_id.to_string(),
                index,
            })
    }

    /// Generate a five-paragraph composition for a selection
    pub async fn personal_statement(
        &self,
        selection: &UserSelection,
        prompt: &str,
    ) -> Result<PersonalStatement> {
        let selected_domain = selection
            .selected()
            .map(|option| option.title.clone())
            .ok_or_else(|| ResearchError::InvalidSelection {
                session_id: String::new(),
                index: selection.selection_index,
            })?;

        let text = self.generator.generate(prompt).await?;
        debug!("Splitting personal statement for {}", selected_domain);

        Ok(PersonalStatement {
            paragraphs: split_paragraphs(&text),
            selected_domain,
            generated_at: Utc::now(),
        })
    }
}
