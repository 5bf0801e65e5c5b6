// Prompt constants for the evaluation stage.

/// System instruction fixing the strict-but-fair scoring policy.
pub const EVALUATION_SYSTEM: &str = "You are an expert career advisor and resume evaluator. \
    You return strict but accurate feedback with practical suggestions.";

/// Evaluation prompt template. Replace `{profile}` and `{listing}` before
/// sending. The `Fit Score: <score>/100` line is load-bearing: the scoring
/// stage extracts the numeric score from it.
const EVALUATION_PROMPT_TEMPLATE: &str = r#"I will provide:
1. My resume.
2. A job listing.

Your task is to evaluate my exact fit for the job based strictly on the information provided.

Requirements:
- Be extremely detailed and realistic in your scoring.
- Do NOT inflate the score.
- Use the full range from 0 to 100.
- Deduct points for each missing qualification or mismatch.
- Provide actionable, specific suggestions, not generic tips.
- Return the result content in an HTML format (eg. <a> for links)

Format your response EXACTLY as follows:
---
Job Title: <title>

Company:

Job Application Link:
<url>

Fit Score: <score>/100

Explanation:
<why this score was given - be specific and refer to the resume and job listing directly>

Suggested Resume Changes:
- <specific change 1>
- <specific change 2>

Missing Qualifications:
- <missing 1>
- <missing 2>
---

Here is my resume:
===
{profile}
===

Here is the job listing:
===
{listing}
===
"#;

pub fn evaluation_prompt(profile: &str, listing: &str) -> String {
    EVALUATION_PROMPT_TEMPLATE
        .replace("{profile}", profile)
        .replace("{listing}", listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_profile_and_listing() {
        let prompt = evaluation_prompt("my resume text", "Title: Engineer");
        assert!(prompt.contains("my resume text"));
        assert!(prompt.contains("Title: Engineer"));
        assert!(!prompt.contains("{profile}"));
        assert!(!prompt.contains("{listing}"));
    }

    #[test]
    fn test_prompt_requires_fit_score_line() {
        let prompt = evaluation_prompt("", "");
        assert!(prompt.contains("Fit Score: <score>/100"));
    }
}
