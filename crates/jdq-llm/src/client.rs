//! Chat-completions client that scores one dimension per request

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use jdq_core::{
    AnalysisRequest, BiasIssue, Dimension, DimensionAnalyzer, DimensionDetails, DimensionReport,
    Error, Language, Result,
};

use crate::config::LlmConfig;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Dimension analyzer backed by an OpenAI-compatible LLM endpoint
pub struct LlmAnalyzerClient {
    config: LlmConfig,
    client: Client,
    request_timeout: Duration,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl LlmAnalyzerClient {
    /// Create a new client from configuration
    pub fn new(config: LlmConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            config,
            client,
            request_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LlmConfig::from_env()?)
    }

    /// Replace the HTTP client, e.g. to configure proxies or TLS
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .header("Content-Type", "application/json")
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Analyzer(format!(
                "LLM request failed with status {}: {}",
                status, error_text
            )));
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| Error::Analyzer("Empty response from LLM".to_string()))
    }
}

#[async_trait]
impl DimensionAnalyzer for LlmAnalyzerClient {
    async fn analyze(&self, dimension: Dimension, request: &AnalysisRequest) -> Result<DimensionReport> {
        let system_prompt = system_prompt(dimension, request.language);
        let user_prompt = format!("Job description:\n\n{}", request.text);

        let content = match timeout(self.request_timeout, self.complete(&system_prompt, &user_prompt)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::Timeout(format!(
                    "LLM request for {} timed out",
                    dimension
                )));
            }
        };

        debug!(dimension = %dimension, bytes = content.len(), "LLM response received");
        parse_report(dimension, &content)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

/// System prompt asking for a JSON object shaped like the dimension's details
pub fn system_prompt(dimension: Dimension, language: Language) -> String {
    let task = match dimension {
        Dimension::Readability => {
            "Assess the readability of the job description. Return fields \
             flesch_reading_ease, flesch_kincaid_grade, gunning_fog, avg_sentence_length \
             (numbers) and recommendations (array of strings)."
        }
        Dimension::Completeness => {
            "Check that the job description has a summary, key activities, qualifications, \
             working conditions and language/security requirements. Return fields \
             present_sections, missing_sections, thin_sections and recommendations (arrays of strings)."
        }
        Dimension::Clarity => {
            "Assess the clarity of the job description. Return fields passive_voice_ratio \
             (0 to 1), long_sentences (integer), jargon_terms and recommendations (arrays of strings)."
        }
        Dimension::Inclusivity => {
            "Find non-inclusive or biased language. Return fields issues, masculine_coded, \
             feminine_coded and recommendations. Each issue has type (gender, age, disability, \
             cultural, gender-coded-masculine or gender-coded-feminine), severity (low, medium, \
             high or critical), problematic_text, explanation, suggested_alternatives, and \
             start_index/end_index as character offsets into the job description text, end exclusive."
        }
        Dimension::Compliance => {
            "Check for an employment equity statement, an accommodation statement, official \
             language requirements, a security clearance level and a classification or salary. \
             Return fields checks_passed, checks_total (integers), missing_elements and \
             recommendations (arrays of strings)."
        }
    };

    let reply_language = match language {
        Language::En => "English",
        Language::Fr => "French",
    };

    format!(
        "You review job descriptions for quality. {} Also return score, a number from 0 to 100 \
         where 100 is best. Write recommendations in {}. Respond with a single JSON object only.",
        task, reply_language
    )
}

/// Remove a surrounding Markdown code fence, if any
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string (e.g. `json`) on the opening line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Turn a model reply into a report for `dimension`.
///
/// The reply's own `dimension` field, if any, is overwritten. Out-of-range
/// scores are clamped to [0, 100]. Bias issues that do not parse are left
/// out and counted in `rejected_issues`.
pub fn parse_report(dimension: Dimension, content: &str) -> Result<DimensionReport> {
    let mut value: Value = serde_json::from_str(strip_code_fences(content))?;
    let object = value
        .as_object_mut()
        .ok_or_else(|| Error::Analyzer(format!("Expected a JSON object for {}", dimension)))?;

    let raw_score = object
        .remove("score")
        .and_then(|score| score.as_f64())
        .filter(|score| score.is_finite())
        .ok_or_else(|| Error::Analyzer(format!("Missing numeric score for {}", dimension)))?;

    let score = raw_score.clamp(0.0, 100.0);
    if score != raw_score {
        warn!(dimension = %dimension, raw_score, "Clamped out-of-range LLM score");
    }

    if dimension == Dimension::Inclusivity {
        let (issues, rejected) = split_issues(dimension, object.remove("issues"));
        object.insert("issues".to_string(), Value::Array(issues));
        object.insert("rejected_issues".to_string(), Value::from(rejected));
    }

    object.insert("dimension".to_string(), Value::String(dimension.key().to_string()));
    let details: DimensionDetails = serde_json::from_value(value)?;

    Ok(DimensionReport::new(score, details))
}

/// Keep the issue entries that read as a `BiasIssue`; count the rest
fn split_issues(dimension: Dimension, issues: Option<Value>) -> (Vec<Value>, usize) {
    let entries = match issues {
        None | Some(Value::Null) => return (Vec::new(), 0),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            warn!(dimension = %dimension, value = %other, "Ignoring non-array issues field");
            return (Vec::new(), 1);
        }
    };

    let mut kept = Vec::with_capacity(entries.len());
    let mut rejected = 0;
    for entry in entries {
        match serde_json::from_value::<BiasIssue>(entry.clone()) {
            Ok(_) => kept.push(entry),
            Err(e) => {
                warn!(dimension = %dimension, error = %e, "Skipping malformed bias issue");
                rejected += 1;
            }
        }
    }
    (kept, rejected)
}
