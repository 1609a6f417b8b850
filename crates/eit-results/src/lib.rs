//! eit-results: solved-graph wire format, assembly and storage.

pub mod assemble;
pub mod store;
pub mod types;

pub use assemble::assemble;
pub use store::{from_json_str, load_json, save_json, to_json_string};
pub use types::*;

use eit_core::ErrorKind;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("Inconsistent solve result: {what}")]
    Consistency { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResultsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResultsError::Consistency { .. } => ErrorKind::Consistency,
            ResultsError::Io(_) | ResultsError::Json(_) => ErrorKind::Io,
        }
    }
}
