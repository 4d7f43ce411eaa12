use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// Default chat-completions endpoint (OpenAI-compatible).
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Output-token budget per batch request.
pub const MAX_COMPLETION_TOKENS: u32 = 2000;

/// Chat-completion backend. One call per batch; deterministic sampling.
pub trait ChatClient {
    /// Send one request and return the raw assistant message content.
    fn complete(&self, model: &str, system: &str, prompt: &str) -> Result<String, AnalysisError>;
}

/// Blocking HTTP client for an OpenAI-compatible chat-completions API.
#[derive(Clone)]
pub struct GroqClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GroqClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnalysisError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Client against the public Groq endpoint with a 30-second call timeout.
    pub fn with_api_key(api_key: &str) -> Result<Self, AnalysisError> {
        Self::new(GROQ_API_BASE, api_key, 30)
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl ChatClient for GroqClient {
    fn complete(&self, model: &str, system: &str, prompt: &str) -> Result<String, AnalysisError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: prompt },
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    AnalysisError::Timeout(self.timeout_secs)
                } else {
                    AnalysisError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AnalysisError::ResponseParsing("response had no choices".into()))
    }
}

/// Mock chat client for testing — replays a scripted sequence of outcomes,
/// then repeats the last one.
pub struct MockChatClient {
    script: Vec<Result<String, AnalysisError>>,
    calls: std::cell::RefCell<usize>,
    seen_models: std::cell::RefCell<Vec<String>>,
}

impl MockChatClient {
    pub fn new(response: &str) -> Self {
        Self::with_script(vec![Ok(response.to_string())])
    }

    pub fn with_script(script: Vec<Result<String, AnalysisError>>) -> Self {
        assert!(!script.is_empty(), "script must have at least one outcome");
        Self {
            script,
            calls: std::cell::RefCell::new(0),
            seen_models: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.borrow()
    }

    pub fn models_seen(&self) -> Vec<String> {
        self.seen_models.borrow().clone()
    }
}

impl ChatClient for MockChatClient {
    fn complete(&self, model: &str, _system: &str, _prompt: &str) -> Result<String, AnalysisError> {
        let mut calls = self.calls.borrow_mut();
        let idx = (*calls).min(self.script.len() - 1);
        *calls += 1;
        self.seen_models.borrow_mut().push(model.to_string());
        match &self.script[idx] {
            Ok(s) => Ok(s.clone()),
            Err(e) => Err(clone_error(e)),
        }
    }
}

fn clone_error(e: &AnalysisError) -> AnalysisError {
    match e {
        AnalysisError::Connection(s) => AnalysisError::Connection(s.clone()),
        AnalysisError::Timeout(s) => AnalysisError::Timeout(*s),
        AnalysisError::Api { status, body } => AnalysisError::Api {
            status: *status,
            body: body.clone(),
        },
        AnalysisError::HttpClient(s) => AnalysisError::HttpClient(s.clone()),
        AnalysisError::ResponseParsing(s) => AnalysisError::ResponseParsing(s.clone()),
    }
}
