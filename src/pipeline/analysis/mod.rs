pub mod analyzer;
pub mod groq;
pub mod model_pool;
pub mod parser;
pub mod prompt;
pub mod taxonomy;
pub mod types;

pub use analyzer::*;
pub use groq::*;
pub use model_pool::*;
pub use parser::*;
pub use prompt::*;
pub use taxonomy::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Cannot reach chat-completion endpoint at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("API returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}
