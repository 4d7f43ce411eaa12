pub mod csv;
pub mod sheets;

pub use csv::*;
pub use sheets::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Sheets API returned error (status {status}): {body}")]
    Api { status: u16, body: String },
}
