use std::collections::HashMap;

use crate::domain::ProviderResponse;

/// Process-local, best-effort provider response cache. A miss is always
/// safe; it just costs a network call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub provider: String,
    pub prompt: String,
    pub locale: String,
    pub brand_name: String,
}

#[derive(Default)]
pub struct ResponseCache {
    entries: HashMap<CacheKey, ProviderResponse>,
}

impl ResponseCache {
    pub fn new() -> Self {
        ResponseCache::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&ProviderResponse> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: CacheKey, response: ProviderResponse) {
        self.entries.insert(key, response);
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheKey, ResponseCache};
    use crate::domain::ProviderResponse;

    fn key(provider: &str, prompt: &str, locale: &str, brand: &str) -> CacheKey {
        CacheKey {
            provider: provider.to_string(),
            prompt: prompt.to_string(),
            locale: locale.to_string(),
            brand_name: brand.to_string(),
        }
    }

    fn response(text: &str) -> ProviderResponse {
        ProviderResponse {
            provider: "openai".to_string(),
            answer_text: text.to_string(),
            citations: vec![],
            raw_json: serde_json::json!({}),
        }
    }

    #[test]
    fn hit_requires_every_key_component_to_match() {
        let mut cache = ResponseCache::new();
        cache.set(key("openai", "Who is Acme?", "en-CA", "Acme"), response("cached"));

        assert!(cache.get(&key("openai", "Who is Acme?", "en-CA", "Acme")).is_some());
        assert!(cache.get(&key("brave_search", "Who is Acme?", "en-CA", "Acme")).is_none());
        assert!(cache.get(&key("openai", "Who is Acme?", "en-US", "Acme")).is_none());
        assert!(cache.get(&key("openai", "Who is Acme?", "en-CA", "Other")).is_none());
    }

    #[test]
    fn set_overwrites_the_same_key() {
        let mut cache = ResponseCache::new();
        let k = key("openai", "Who is Acme?", "en-CA", "Acme");

        cache.set(k.clone(), response("first"));
        cache.set(k.clone(), response("second"));

        assert_eq!(cache.get(&k).unwrap().answer_text, "second");
    }
}
