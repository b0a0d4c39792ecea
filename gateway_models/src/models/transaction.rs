use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

/// A single call for a smart-account bundler to submit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TransactionCall {
    pub to: Address,
    pub data: Bytes,
    /// Native value in wei, as a decimal string
    pub value: String,
}

impl TransactionCall {
    /// A call that sends no native currency.
    pub fn without_value(to: Address, data: Bytes) -> Self {
        Self {
            to,
            data,
            value: "0".to_string(),
        }
    }
}

/// The approve + swap pair produced for a deposit.
///
/// The swap spends the allowance granted by the approval, so the approval
/// is always submitted first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositTransactions {
    pub approval: TransactionCall,
    pub swap: TransactionCall,
}

impl DepositTransactions {
    pub fn into_ordered(self) -> Vec<TransactionCall> {
        vec![self.approval, self.swap]
    }
}
