//! Riddles from the Open Trivia Database.

use serde::Deserialize;
use std::time::Duration;

use super::types::{decode_entities, ProviderError, Riddle, RiddleProvider};
use crate::core::constants::OPEN_TRIVIA_URL;

#[derive(Deserialize)]
struct TriviaResponse {
    response_code: u32,
    results: Vec<TriviaQuestion>,
}

#[derive(Deserialize)]
struct TriviaQuestion {
    question: String,
    correct_answer: String,
}

/// Fetches one boolean question per riddle room over HTTP.
pub struct OpenTriviaProvider {
    agent: ureq::Agent,
    url: String,
}

impl OpenTriviaProvider {
    pub fn new(timeout: Duration) -> Self {
        Self::with_url(OPEN_TRIVIA_URL, timeout)
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent("delve")
            .build();
        Self {
            agent,
            url: url.into(),
        }
    }
}

impl RiddleProvider for OpenTriviaProvider {
    fn fetch(&mut self) -> Result<Riddle, ProviderError> {
        tracing::debug!(url = %self.url, "fetching riddle");
        let response: TriviaResponse = self
            .agent
            .get(&self.url)
            .call()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?
            .into_json()
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        riddle_from_response(response)
    }
}

/// Turns a trivia API body into a riddle.
pub fn parse_trivia_response(body: &str) -> Result<Riddle, ProviderError> {
    let response: TriviaResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    riddle_from_response(response)
}

fn riddle_from_response(response: TriviaResponse) -> Result<Riddle, ProviderError> {
    if response.response_code != 0 {
        return Err(ProviderError::Unavailable(format!(
            "response code {}",
            response.response_code
        )));
    }

    let question = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("no results".to_string()))?;

    let answer = match question.correct_answer.to_lowercase().as_str() {
        "true" => true,
        "false" => false,
        other => {
            return Err(ProviderError::Malformed(format!(
                "not a boolean answer: {}",
                other
            )))
        }
    };

    Ok(Riddle::new(decode_entities(&question.question), answer))
}
