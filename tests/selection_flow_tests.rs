//! Integration tests for selection sessions and the research service

use async_trait::async_trait;
use futures::future::join_all;
use research_options::cache::{CacheConfig, ResearchCache};
use research_options::error::{ResearchError, UpstreamError};
use research_options::generation::{RetryPolicy, RetryingGenerator, TextGenerator};
use research_options::schema::{ResearchOption, ResearchRequest};
use research_options::service::ResearchService;
use research_options::session::{SelectionStore, SessionConfig};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

const RESPONSE: &str = "\
【细分领域1: 人工智能伦理】 (匹配度: 90%)
一句话总结:
研究算法公平与透明

【细分领域2: 数据治理】 (匹配度: 85%)
一句话总结:
研究数据标准与隐私

【细分领域3: 智慧医疗】 (匹配度: 80%)
一句话总结:
研究临床决策支持
";

/// Fails a fixed number of times with a transient error, then answers
struct FlakyModel {
    failures: u32,
    calls: AtomicU32,
}

#[async_trait]
impl TextGenerator for FlakyModel {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(UpstreamError::Request("connection reset".into()));
        }
        if prompt.starts_with("statement") {
            Ok("第一段\n\n第二段\n\n第三段".to_string())
        } else {
            Ok(RESPONSE.to_string())
        }
    }
}

fn options() -> Vec<ResearchOption> {
    vec![ResearchOption::new("A", 80, "s", vec![], vec![]); 3]
}

fn service_with(failures: u32, session_ttl: Duration) -> ResearchService {
    let model = FlakyModel {
        failures,
        calls: AtomicU32::new(0),
    };
    let policy = RetryPolicy {
        max_retries: 2,
        retry_delay: Duration::from_millis(1),
    };

    ResearchService::new(
        Arc::new(RetryingGenerator::new(model, policy)),
        Arc::new(ResearchCache::new(CacheConfig::default())),
        Arc::new(SelectionStore::new(SessionConfig::with_ttl(session_ttl))),
    )
}

#[test]
fn test_session_lifecycle_blocking() {
    let store = SelectionStore::new(SessionConfig::default());

    let id = tokio_test::block_on(store.create(&options()));
    assert!(tokio_test::block_on(store.validate_index(&id, 2)));
    assert!(!tokio_test::block_on(store.validate_index(&id, 3)));
    assert_eq!(tokio_test::block_on(store.get(&id)), Some(options()));
}

#[tokio::test]
async fn test_sessions_are_independent_snapshots() {
    let store = SelectionStore::new(SessionConfig::default());
    let mut offered = options();

    let id = store.create(&offered).await;
    offered[0].title = "changed".to_string();

    assert_eq!(store.get(&id).await.unwrap()[0].title, "A");
}

#[tokio::test]
async fn test_concurrent_session_creation() {
    let store = Arc::new(SelectionStore::new(SessionConfig::default()));

    let ids = join_all((0..20).map(|_| {
        let store = store.clone();
        async move { store.create(&options()).await }
    }))
    .await;

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 20);
    assert_eq!(store.len().await, 20);
}

#[tokio::test]
async fn test_research_survives_transient_failures() {
    let service = service_with(2, Duration::from_secs(60));
    let request = ResearchRequest::new("MIT", "CS", "Algorithms", "Robotics");

    let outcome = service.research(&request, "research").await.unwrap();
    assert!(!outcome.from_cache);
    assert_eq!(outcome.options.len(), 3);
    assert_eq!(outcome.cache_key.len(), 32);
}

#[tokio::test]
async fn test_research_fails_when_retries_exhausted() {
    let service = service_with(5, Duration::from_secs(60));
    let request = ResearchRequest::new("MIT", "CS", "Algorithms", "Robotics");

    let err = service.research(&request, "research").await.unwrap_err();
    assert!(matches!(
        err,
        ResearchError::Upstream(UpstreamError::Exhausted { attempts: 3, .. })
    ));
}

#[tokio::test]
async fn test_selection_after_session_expiry_is_invalid() {
    let service = service_with(0, Duration::from_millis(50));
    let request = ResearchRequest::new("MIT", "CS", "Algorithms", "Robotics");

    let outcome = service.research(&request, "research").await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;

    let err = service.select(&outcome.session_id, 0).await.unwrap_err();
    assert!(matches!(err, ResearchError::InvalidSelection { .. }));
}

#[tokio::test]
async fn test_full_flow_to_personal_statement() {
    let service = service_with(0, Duration::from_secs(60));
    let request = ResearchRequest::new("MIT", "CS", "Algorithms", "Robotics");

    let outcome = service.research(&request, "research").await.unwrap();
    let selection = service.select(&outcome.session_id, 0).await.unwrap();
    let statement = service
        .personal_statement(&selection, "statement for option 1")
        .await
        .unwrap();

    assert_eq!(statement.selected_domain, "人工智能伦理");
    assert_eq!(statement.paragraphs[0], "第一段");
    assert_eq!(statement.paragraphs[2], "第三段");
    assert_eq!(statement.paragraphs[3], "第4段内容待补充");
}
