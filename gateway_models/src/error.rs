use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ModelResult<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Error {
    #[error("Parse error")]
    ParseError,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Reqwest error: {0}")]
    ReqwestError(String),

    #[error("Upstream responded with status {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Serde deserialize error: {0}")]
    SerdeDeserialize(String),

    #[error("Request body too large: {0}")]
    TooLargeRequestBody(String),
}
