use std::env;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clausecheck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "clausecheck=info".to_string()
}

/// Candidate models in rotation order. The analyzer advances through this
/// pool once per retry attempt so a struggling model is not retried blindly.
pub const DEFAULT_MODEL_POOL: &[&str] = &[
    "moonshotai/kimi-k2-instruct",
    "moonshotai/kimi-k2-instruct-0905",
    "llama-3.3-70b-versatile",
    "openai/gpt-oss-20b",
    "openai/gpt-oss-120b",
    "meta-llama/llama-4-scout-17b-16e-instruct",
    "deepseek-r1-distill-llama-70b",
    "qwen/qwen3-32b",
    "gemma2-9b-it",
    "llama-3.1-8b-instant",
    "meta-llama/llama-4-maverick-17b-128e-instruct",
];

/// Default number of clauses per model request.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// API key for the chat-completion endpoint. Fatal for the analyzer when
/// absent; the extractor and local sinks do not need it.
pub fn groq_api_key() -> Option<String> {
    env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty())
}

/// Spreadsheet the sheet sink writes into.
pub fn gsheet_id() -> Option<String> {
    env::var("GSHEET_ID").ok().filter(|id| !id.is_empty())
}

/// Path to the Google service-account key file.
/// Defaults to `services.json` in the working directory.
pub fn service_account_file() -> PathBuf {
    env::var("GOOGLE_SERVICE_ACCOUNT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("services.json"))
}
