//! Description resolution — cache-aside lookup of one listing's full
//! description with classified errors and a bounded retry policy.

pub mod pool;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::{description_key, DescriptionCache};
use crate::errors::ResolveError;
use crate::models::{Description, ListingRef};
use crate::retry::RetryPolicy;

/// External description source, keyed by listing id. The real implementation
/// lives in `listing_source`; tests substitute scripted mocks.
#[async_trait]
pub trait DescriptionSource: Send + Sync {
    /// Returns the (possibly empty) array of descriptions the source knows
    /// for this listing id. Must classify throttling as
    /// `ResolveError::RateLimited` and other failure statuses as
    /// `ResolveError::Upstream`.
    async fn fetch_description(&self, listing_id: &str) -> Result<Vec<Description>, ResolveError>;
}

/// Shared pacing gate: external description requests across all concurrency
/// slots start no closer together than `interval`. Cache hits never wait on
/// the gate.
pub struct RateGate {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Waits until at least `interval` has elapsed since the previous turn,
    /// then claims the current instant as the new turn.
    pub async fn wait_turn(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            let ready_at = prev + self.interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Resolves one `ListingRef` to a `Description`: cache first, then the
/// external source under the rate gate and retry policy, then a best-effort
/// cache write.
pub struct DescriptionResolver {
    source: Arc<dyn DescriptionSource>,
    cache: Arc<dyn DescriptionCache>,
    retry: RetryPolicy,
    cache_ttl: Duration,
}

impl DescriptionResolver {
    pub fn new(
        source: Arc<dyn DescriptionSource>,
        cache: Arc<dyn DescriptionCache>,
        retry: RetryPolicy,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            retry,
            cache_ttl,
        }
    }

    pub async fn resolve(
        &self,
        listing: &ListingRef,
        gate: &RateGate,
    ) -> Result<Description, ResolveError> {
        let key = description_key(&listing.id);

        // Cache hit short-circuits: no validation, no gate wait, no network.
        match self.cache.get(&key).await {
            Ok(Some(description)) => {
                debug!(job_id = %listing.id, "description cache hit");
                return Ok(description);
            }
            Ok(None) => {}
            Err(e) => {
                // Access failure is treated as a miss; the cache is an
                // optimization, not the system of record.
                warn!(job_id = %listing.id, error = %e, "cache read failed, treating as miss");
            }
        }

        if listing.id.trim().is_empty() {
            return Err(ResolveError::InvalidInput);
        }

        let description = self
            .retry
            .run("description fetch", ResolveError::is_retryable, || async {
                gate.wait_turn().await;
                let mut payload = self.source.fetch_description(&listing.id).await?;
                if payload.is_empty() {
                    return Err(ResolveError::EmptyResult);
                }
                Ok(payload.remove(0))
            })
            .await?;

        if let Err(e) = self.cache.set(&key, &description, self.cache_ttl).await {
            warn!(job_id = %listing.id, error = %e, "cache write failed, continuing");
        }

        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::cache::memory::MemoryCache;

    fn sample_description() -> Description {
        serde_json::from_str(
            r#"{
                "job_position": "Software Engineer",
                "company_name": "Tech Corp",
                "job_location": "New York, NY",
                "job_description": "Build cool things.",
                "job_apply_link": "http://apply.here"
            }"#,
        )
        .unwrap()
    }

    fn listing(id: &str) -> ListingRef {
        ListingRef {
            id: id.to_string(),
            position_title: "Software Engineer".to_string(),
            company_name: "Tech Corp".to_string(),
            location_hint: "New York, NY".to_string(),
        }
    }

    /// Scripted source: pops one canned response per call.
    pub(crate) struct ScriptedSource {
        responses: Mutex<Vec<Result<Vec<Description>, ResolveError>>>,
        pub calls: AtomicUsize,
    }

    impl ScriptedSource {
        pub(crate) fn new(mut responses: Vec<Result<Vec<Description>, ResolveError>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DescriptionSource for ScriptedSource {
        async fn fetch_description(
            &self,
            _listing_id: &str,
        ) -> Result<Vec<Description>, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .await
                .pop()
                .unwrap_or(Err(ResolveError::EmptyResult))
        }
    }

    fn resolver(
        source: Arc<ScriptedSource>,
        cache: Arc<MemoryCache>,
    ) -> DescriptionResolver {
        DescriptionResolver::new(
            source,
            cache,
            RetryPolicy::new(5, Duration::from_secs(2)),
            Duration::from_secs(24 * 60 * 60),
        )
    }

    fn gate() -> RateGate {
        RateGate::new(Duration::from_millis(0))
    }

    #[tokio::test]
    async fn test_cache_hit_makes_no_network_call() {
        let cache = Arc::new(MemoryCache::new());
        cache.insert(&description_key("1"), sample_description());
        let source = Arc::new(ScriptedSource::new(vec![]));

        let resolved = resolver(source.clone(), cache)
            .resolve(&listing("1"), &gate())
            .await
            .unwrap();

        assert_eq!(resolved.position_title, "Software Engineer");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_fetches_and_populates_cache() {
        let cache = Arc::new(MemoryCache::new());
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![sample_description()])]));

        let r = resolver(source.clone(), cache.clone());
        r.resolve(&listing("1"), &gate()).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains(&description_key("1")));

        // Second resolution of the same listing is a cache hit.
        r.resolve(&listing("1"), &gate()).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_id_fails_fast_without_network_call() {
        let cache = Arc::new(MemoryCache::new());
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![sample_description()])]));

        let err = resolver(source.clone(), cache)
            .resolve(&listing("  "), &gate())
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::InvalidInput));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_then_success_retries() {
        let cache = Arc::new(MemoryCache::new());
        let source = Arc::new(ScriptedSource::new(vec![
            Err(ResolveError::RateLimited),
            Err(ResolveError::RateLimited),
            Ok(vec![sample_description()]),
        ]));

        let resolved = resolver(source.clone(), cache)
            .resolve(&listing("1"), &gate())
            .await
            .unwrap();

        assert_eq!(resolved.company_name, "Tech Corp");
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_upstream_error_does_not_retry() {
        let cache = Arc::new(MemoryCache::new());
        let source = Arc::new(ScriptedSource::new(vec![
            Err(ResolveError::Upstream {
                status: 401,
                body: "bad key".to_string(),
            }),
            Ok(vec![sample_description()]),
        ]));

        let err = resolver(source.clone(), cache)
            .resolve(&listing("1"), &gate())
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Upstream { status: 401, .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_payload_is_empty_result() {
        let cache = Arc::new(MemoryCache::new());
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![])]));

        let err = resolver(source, cache.clone())
            .resolve(&listing("1"), &gate())
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::EmptyResult));
        assert!(!cache.contains(&description_key("1")));
    }

    #[tokio::test]
    async fn test_cache_outage_does_not_fail_resolution() {
        let cache = Arc::new(MemoryCache::new());
        cache.fail.store(true, Ordering::SeqCst);
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![sample_description()])]));

        let resolved = resolver(source, cache)
            .resolve(&listing("1"), &gate())
            .await
            .unwrap();

        assert_eq!(resolved.position_title, "Software Engineer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_gate_spaces_consecutive_turns() {
        let gate = RateGate::new(Duration::from_secs(2));
        let start = Instant::now();
        gate.wait_turn().await; // first turn is free
        gate.wait_turn().await;
        gate.wait_turn().await;
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }
}
