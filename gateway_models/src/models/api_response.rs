use serde::{Deserialize, Serialize};

use crate::models::transaction::TransactionCall;

/// Error envelope shared by every route.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: details.filter(|details| !details.is_empty()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DepositResponse {
    pub success: bool,
    pub transactions: Vec<TransactionCall>,
}

impl DepositResponse {
    pub fn success(transactions: Vec<TransactionCall>) -> Self {
        Self {
            success: true,
            transactions,
        }
    }
}
