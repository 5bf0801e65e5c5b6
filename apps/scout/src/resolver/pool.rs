//! Resolution pool — bounded-concurrency fan-out over listings with a shared
//! rate gate and a full barrier join. Individual failures are logged and
//! dropped; siblings are never affected.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::cache::DescriptionCache;
use crate::models::{Description, ListingRef};
use crate::resolver::{DescriptionResolver, DescriptionSource, RateGate};
use crate::retry::RetryPolicy;

pub struct ResolutionPool {
    resolver: Arc<DescriptionResolver>,
    semaphore: Arc<Semaphore>,
    gate: Arc<RateGate>,
}

impl ResolutionPool {
    pub fn new(
        source: Arc<dyn DescriptionSource>,
        cache: Arc<dyn DescriptionCache>,
        max_concurrent: usize,
        rate_gate_interval: Duration,
        retry: RetryPolicy,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            resolver: Arc::new(DescriptionResolver::new(source, cache, retry, cache_ttl)),
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            gate: Arc::new(RateGate::new(rate_gate_interval)),
        }
    }

    /// Resolves every listing, waiting for all submitted work before
    /// returning. Output preserves submission order (failed listings are
    /// dropped), which keeps the downstream tie-break deterministic.
    ///
    /// Dropping the returned future aborts in-flight resolutions: the
    /// `JoinSet` owns the tasks.
    pub async fn resolve_all(&self, listings: Vec<ListingRef>) -> Vec<Description> {
        let total = listings.len();
        let mut tasks: JoinSet<(usize, ListingRef, Result<Description, _>)> = JoinSet::new();

        for (index, listing) in listings.into_iter().enumerate() {
            let resolver = self.resolver.clone();
            let semaphore = self.semaphore.clone();
            let gate = self.gate.clone();

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("resolution semaphore closed");
                let result = resolver.resolve(&listing, &gate).await;
                (index, listing, result)
            });
        }

        let mut slots: Vec<Option<Description>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, _listing, Ok(description))) => slots[index] = Some(description),
                Ok((index, listing, Err(e))) => {
                    warn!(
                        job_id = %listing.id,
                        position = %listing.position_title,
                        index,
                        error = %e,
                        "dropping listing after failed resolution"
                    );
                }
                Err(e) => error!(error = %e, "resolution task panicked"),
            }
        }

        let resolved: Vec<Description> = slots.into_iter().flatten().collect();
        info!(resolved = resolved.len(), total, "description resolution complete");
        resolved
    }
}
