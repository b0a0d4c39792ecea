use error_stack::{AttachmentKind, FrameKind, Report};
use gateway_models::error::Error as ModelError;
use thiserror::Error;

pub type GatewayResult<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Server configuration error.")]
    ConfigurationMissing(&'static str),

    #[error("Failed to fetch decimals. The provided address may not be a valid ERC20 token.")]
    TokenQueryFailed,

    #[error("No corresponding aToken found for asset {0}.")]
    ReserveNotFound(String),

    #[error("Failed to resolve output token from HyperLend API.")]
    LendingMarketUnavailable,

    #[error("Failed to fetch quote from GlueX.")]
    QuoteServiceFailed { status: u16, body: String },

    #[error("Method {0} not found or failed to execute")]
    ContractCallFailed(String),

    #[error("RPC error")]
    RpcError,

    #[error("Upstream request failed with status {status}")]
    UpstreamFailed { status: u16, body: String },

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Models error")]
    ModelsError,

    #[error("Unknown error")]
    Unknown,
}

impl Error {
    /// HTTP status reported to the caller for this failure class.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidArgument(_) | Error::TokenQueryFailed | Error::ContractCallFailed(_) => {
                400
            }
            Error::ReserveNotFound(_) => 404,
            Error::PayloadTooLarge => 413,
            Error::LendingMarketUnavailable => 502,
            Error::QuoteServiceFailed { status, .. } | Error::UpstreamFailed { status, .. } => {
                if (400..=599).contains(status) {
                    *status
                } else {
                    502
                }
            }
            Error::ConfigurationMissing(_)
            | Error::RpcError
            | Error::ConfigError(_)
            | Error::ModelsError
            | Error::Unknown => 500,
        }
    }

    /// Raw upstream body, when the failure came from an upstream response.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Error::QuoteServiceFailed { body, .. } | Error::UpstreamFailed { body, .. } => {
                Some(body.as_str())
            }
            _ => None,
        }
    }
}

pub trait ReportDisplayExt {
    fn format(&self) -> String;
}

impl ReportDisplayExt for Report<Error> {
    fn format(&self) -> String {
        let mut output = String::new();

        for frame in self.frames() {
            if let FrameKind::Attachment(AttachmentKind::Printable(attachment)) = frame.kind() {
                output.push_str(&format!(" {attachment} "));
            }
        }

        output.trim().to_string()
    }
}

/// Re-classifies a failure of the shared models crate into a gateway error.
pub trait ModelReportExt {
    fn into_gateway(self) -> Report<Error>;
}

impl ModelReportExt for Report<ModelError> {
    fn into_gateway(self) -> Report<Error> {
        let context = match self.current_context() {
            ModelError::ValidationError(message) => Error::InvalidArgument(message.clone()),
            ModelError::SerdeDeserialize(message) => Error::InvalidArgument(message.clone()),
            ModelError::TooLargeRequestBody(_) => Error::PayloadTooLarge,
            ModelError::UpstreamStatus { status, body } => Error::UpstreamFailed {
                status: *status,
                body: body.clone(),
            },
            _ => Error::ModelsError,
        };
        self.change_context(context)
    }
}
