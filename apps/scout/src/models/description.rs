use serde::{Deserialize, Serialize};

/// Fully resolved detail record for one listing. Immutable once produced:
/// either reconstructed from the cache or fetched fresh, then cached under a
/// key derived from the listing id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "job_position")]
    pub position_title: String,
    #[serde(rename = "company_name")]
    pub company_name: String,
    #[serde(rename = "job_location", default)]
    pub location: String,
    #[serde(rename = "job_posting_time", default)]
    pub posting_time: String,
    #[serde(rename = "job_description")]
    pub description_text: String,
    #[serde(rename = "job_apply_link", default)]
    pub apply_link: String,
    #[serde(rename = "Employment_type", alias = "employment_type", default)]
    pub employment_type: String,
    #[serde(rename = "Seniority_level", alias = "seniority_level", default)]
    pub seniority_level: String,
    #[serde(rename = "Job_function", alias = "job_function", default)]
    pub job_function: String,
    #[serde(rename = "Industries", alias = "industries", default)]
    pub industries: String,
    #[serde(default)]
    pub similar_jobs: Vec<RelatedListing>,
    #[serde(default)]
    pub people_also_viewed: Vec<RelatedListing>,
}

/// Summary of a related listing attached to a description payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedListing {
    #[serde(rename = "job_position", alias = "job_title", default)]
    pub position_title: String,
    #[serde(rename = "company_name", default)]
    pub company_name: String,
    #[serde(rename = "job_location", default)]
    pub location: String,
    #[serde(rename = "job_link", default)]
    pub link: String,
}

impl Description {
    /// Renders the description as the plain-text block fed into the
    /// evaluation prompt.
    pub fn to_prompt_text(&self) -> String {
        format!(
            "Title: {}\n\
             Company: {}\n\
             Location: {}\n\
             Posted: {}\n\
             Seniority: {}\n\
             Employment Type: {}\n\
             Function: {}\n\
             Industries: {}\n\
             Apply Link: {}\n\
             Description: {}",
            self.position_title,
            self.company_name,
            self.location,
            self.posting_time,
            self.seniority_level,
            self.employment_type,
            self.job_function,
            self.industries,
            self.apply_link,
            self.description_text,
        )
    }
}
