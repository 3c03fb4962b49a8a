use std::time::Duration;

use imdb_renamer_core::{Candidate, Settings};

use crate::backend::MetadataBackend;

/// How often and how patiently the primary search path is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts on the primary path (at least one is always made)
    pub max_attempts: u32,
    /// Pause between consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_attempts: settings.max_retries,
            delay: settings.retry_delay(),
        }
    }
}

/// Search client wrapping a [`MetadataBackend`] with retry and fallback.
///
/// A search never fails: exhausted retries, malformed responses and empty
/// fallbacks all come back as an empty candidate list, which callers treat
/// as "no match found".
pub struct MetadataClient<B> {
    backend: B,
    policy: RetryPolicy,
    max_results: usize,
}

impl<B: MetadataBackend> MetadataClient<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self::with_policy(
            backend,
            RetryPolicy::from_settings(settings),
            settings.max_search_results,
        )
    }

    pub fn with_policy(backend: B, policy: RetryPolicy, max_results: usize) -> Self {
        Self {
            backend,
            policy,
            max_results,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Search for `title`, returning at most `max_results` candidates in the
    /// backend's relevance order.
    pub async fn search(&self, title: &str) -> Vec<Candidate> {
        let query = build_query(title);
        if query.is_empty() {
            return Vec::new();
        }

        let mut results = self.search_primary(&query).await;
        if results.is_empty() {
            log::info!("No results for '{}', trying fallback search", query);
            results = match self.backend.fallback_search(&query).await {
                Ok(found) => found,
                Err(e) => {
                    log::warn!("Fallback search for '{}' failed: {}", query, e);
                    Vec::new()
                }
            };
        }

        results.truncate(self.max_results);
        results
    }

    async fn search_primary(&self, query: &str) -> Vec<Candidate> {
        let attempts = self.policy.max_attempts.max(1);
        for attempt in 1..=attempts {
            match self.backend.search(query, self.max_results).await {
                Ok(found) => return found,
                Err(e) if e.is_transient() => {
                    if attempt == attempts {
                        log::warn!(
                            "Search for '{}' failed after {} attempts: {}",
                            query,
                            attempts,
                            e
                        );
                        break;
                    }
                    log::warn!(
                        "Retrying search for '{}' due to error: {}. Attempt {} of {}. Retrying in {} seconds...",
                        query,
                        e,
                        attempt,
                        attempts,
                        self.policy.delay.as_secs_f32(),
                    );
                    tokio::time::sleep(self.policy.delay).await;
                }
                Err(e) => {
                    log::error!("Error during IMDb search for '{}': {}", query, e);
                    break;
                }
            }
        }
        Vec::new()
    }
}

/// Normalize a title into a query string: single spaces, no edge whitespace.
pub fn build_query(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
