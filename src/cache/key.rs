//! Content-addressed cache key derivation

use crate::cache::types::CacheKey;
use crate::schema::ResearchRequest;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Hex characters kept from the SHA-256 digest
pub const CACHE_KEY_LEN: usize = 32;

/// Derive the cache key of an already-normalized request.
///
/// The four fields are serialized as a JSON object with sorted keys, hashed
/// with SHA-256, and the hex digest truncated to [`CACHE_KEY_LEN`].
pub fn derive_cache_key(request: &ResearchRequest) -> CacheKey {
    let canonical = json!({
        "school": request.school,
        "major": request.major,
        "courses": request.courses,
        "extracurricular": request.extracurricular,
    })
    .to_string();

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());

    let mut key = hex::encode(hasher.finalize());
    key.truncate(CACHE_KEY_LEN);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ResearchRequest {
        ResearchRequest::new("MIT", "计算机科学", "算法, 数据库", "机器人竞赛")
    }

    #[test]
    fn test_key_is_deterministic() {
        assert_eq!(derive_cache_key(&request()), derive_cache_key(&request()));
    }

    #[test]
    fn test_key_shape() {
        let key = derive_cache_key(&request());
        assert_eq!(key.len(), CACHE_KEY_LEN);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fields_are_not_interchangeable() {
        let a = ResearchRequest::new("A", "B", "", "");
        let b = ResearchRequest::new("B", "A", "", "");
        assert_ne!(derive_cache_key(&a), derive_cache_key(&b));
    }
}
