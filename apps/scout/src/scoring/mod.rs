//! Scoring pool — bounded-concurrency fan-out of oracle evaluations with a
//! full barrier join and deterministic ranking of the results.

pub mod extract;
pub mod prompts;

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::models::{Description, Evaluation, RankedReport};
use crate::oracle::EvaluationOracle;
use crate::scoring::extract::{clean_response, extract_score};
use crate::scoring::prompts::{evaluation_prompt, EVALUATION_SYSTEM};

pub struct ScoringPool {
    oracle: Arc<dyn EvaluationOracle>,
    semaphore: Arc<Semaphore>,
}

impl ScoringPool {
    pub fn new(oracle: Arc<dyn EvaluationOracle>, max_concurrent: usize) -> Self {
        Self {
            oracle,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Evaluates every description against the profile and returns the ranked
    /// report. Waits for all submitted work (barrier) before ranking; a failed
    /// oracle call drops that record only, and a malformed response is kept
    /// with score 0.
    pub async fn evaluate_all(
        &self,
        profile: &str,
        descriptions: Vec<Description>,
    ) -> RankedReport {
        let total = descriptions.len();
        let profile: Arc<str> = Arc::from(profile);
        let mut tasks: JoinSet<Option<Evaluation>> = JoinSet::new();

        for (index, description) in descriptions.into_iter().enumerate() {
            let oracle = self.oracle.clone();
            let semaphore = self.semaphore.clone();
            let profile = profile.clone();

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("scoring semaphore closed");

                info!(index, position = %description.position_title, "evaluating listing");
                let prompt = evaluation_prompt(&profile, &description.to_prompt_text());

                match oracle.evaluate(EVALUATION_SYSTEM, &prompt).await {
                    Ok(raw) => {
                        let cleaned = clean_response(&raw);
                        if !cleaned.to_lowercase().contains("fit score:") {
                            warn!(index, "oracle response is missing the fit score line");
                        }
                        let score = extract_score(&cleaned);
                        Some(Evaluation {
                            score,
                            text: format!("Job Evaluation #{}\n{}\n", index + 1, cleaned),
                            source_index: index,
                        })
                    }
                    Err(e) => {
                        warn!(index, error = %e, "dropping evaluation after oracle failure");
                        None
                    }
                }
            });
        }

        let mut records: Vec<Evaluation> = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(evaluation)) => records.push(evaluation),
                Ok(None) => {}
                Err(e) => error!(error = %e, "scoring task panicked"),
            }
        }

        info!(scored = records.len(), total, "scoring complete, ranking results");
        RankedReport::rank(records)
    }
}
