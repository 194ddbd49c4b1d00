use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::prompt::{advice_prompt, education_prompt};
use super::{AdviceError, EducationTopic, LoanAdvisor};
use crate::config::AdvisorConfig;
use crate::eligibility::{ApplicationInput, EligibilityDecision};

/// Advisor backed by the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiAdvisor {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiAdvisor {
    /// Build an advisor when an API key is configured.
    pub fn from_config(config: &AdvisorConfig) -> Option<Self> {
        let api_key = config.api_key.as_ref()?.trim().to_string();
        if api_key.is_empty() {
            return None;
        }

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Some(Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
        let request = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "requesting advice");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdviceError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        let text = extract_text(body)?;
        info!(response_len = text.len(), "advice received");
        Ok(text)
    }
}

#[async_trait]
impl LoanAdvisor for GeminiAdvisor {
    async fn advise(
        &self,
        input: &ApplicationInput,
        decision: &EligibilityDecision,
    ) -> Result<String, AdviceError> {
        self.generate(&advice_prompt(input, decision)).await
    }

    async fn educate(&self, topic: EducationTopic) -> Result<String, AdviceError> {
        self.generate(&education_prompt(topic)).await
    }
}

/// Pull the first candidate's text out of a `generateContent` response body.
pub fn extract_text(body: Value) -> Result<String, AdviceError> {
    let response: GenerateContentResponse =
        serde_json::from_value(body).map_err(|_| AdviceError::EmptyResponse)?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(AdviceError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn advisor_config(api_key: Option<&str>) -> AdvisorConfig {
        AdvisorConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/".to_string(),
        }
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Raise your down payment." } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        });

        assert_eq!(
            extract_text(body).expect("text present"),
            "Raise your down payment."
        );
    }

    #[test]
    fn missing_candidates_are_empty_responses() {
        let err = extract_text(json!({ "candidates": [] })).expect_err("no candidates");
        assert!(matches!(err, AdviceError::EmptyResponse));

        let err = extract_text(json!({ "error": "quota" })).expect_err("no candidates");
        assert!(matches!(err, AdviceError::EmptyResponse));
    }

    #[test]
    fn advisor_requires_api_key() {
        assert!(GeminiAdvisor::from_config(&advisor_config(None)).is_none());
        assert!(GeminiAdvisor::from_config(&advisor_config(Some("  "))).is_none());

        let advisor =
            GeminiAdvisor::from_config(&advisor_config(Some("secret"))).expect("key configured");
        assert_eq!(
            advisor.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
