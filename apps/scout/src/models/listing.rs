use serde::{Deserialize, Serialize};

/// One entry from a listing search page. The `id` is the unique key used for
/// description resolution and cache addressing; the remaining fields are
/// display hints only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRef {
    #[serde(rename = "job_id")]
    pub id: String,
    #[serde(rename = "job_position")]
    pub position_title: String,
    #[serde(rename = "company_name")]
    pub company_name: String,
    #[serde(rename = "job_location", default)]
    pub location_hint: String,
}
