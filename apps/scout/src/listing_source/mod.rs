//! ScrapingDog LinkedIn jobs client — the single point of entry for all
//! listing-source HTTP calls. Covers both the paginated listing search and
//! the per-id description fetch used by the resolver.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::errors::ResolveError;
use crate::models::{Description, ListingRef};
use crate::resolver::DescriptionSource;

const SCRAPINGDOG_JOBS_URL: &str = "https://api.scrapingdog.com/linkedinjobs";

#[derive(Clone)]
pub struct ScrapingDogClient {
    client: Client,
    api_key: String,
}

impl ScrapingDogClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Fetches one page of listing search results for a search field and
    /// LinkedIn geo id.
    pub async fn search_listings(
        &self,
        field: &str,
        geo_id: u64,
        page: u32,
    ) -> Result<Vec<ListingRef>, ResolveError> {
        let response = self
            .client
            .get(SCRAPINGDOG_JOBS_URL)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("field", field),
                ("geoid", &geo_id.to_string()),
                ("page", &page.to_string()),
                ("sort_by", "day"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let listings: Vec<ListingRef> = response.json().await?;
        info!(count = listings.len(), field, page, "fetched listing search page");
        Ok(listings)
    }
}

#[async_trait]
impl DescriptionSource for ScrapingDogClient {
    async fn fetch_description(&self, listing_id: &str) -> Result<Vec<Description>, ResolveError> {
        debug!(job_id = %listing_id, "fetching description");
        let response = self
            .client
            .get(SCRAPINGDOG_JOBS_URL)
            .query(&[("api_key", self.api_key.as_str()), ("job_id", listing_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let descriptions: Vec<Description> = response.json().await?;
        Ok(descriptions)
    }
}

/// Distinguishes "retry later" (explicit throttling) from fatal statuses.
fn classify_status(status: StatusCode, body: String) -> ResolveError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        ResolveError::RateLimited
    } else {
        ResolveError::Upstream {
            status: status.as_u16(),
            body,
        }
    }
}
