use alloy_primitives::Address;
use error_stack::{ResultExt, report};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::constants::chains::parse_evm_address;
use crate::error::{Error, ModelResult};

/// Body of `POST /api/lending`.
///
/// Fields are optional so that a missing one surfaces as a validation error
/// rather than a deserializer error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub input_token: Option<String>,
    pub user_public_address: Option<String>,
    pub amount: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDeposit {
    pub input_token: Address,
    pub user: Address,
    /// Human-readable amount, e.g. `20.5` for 20.5 tokens
    pub amount: Decimal,
}

impl DepositRequest {
    pub fn validate(&self) -> ModelResult<ValidatedDeposit> {
        let (Some(input_token), Some(user), Some(amount)) = (
            self.input_token.as_deref().filter(|s| !s.is_empty()),
            self.user_public_address.as_deref().filter(|s| !s.is_empty()),
            self.amount.as_ref(),
        ) else {
            return Err(report!(Error::ValidationError(
                "Missing required parameters: inputToken (string), userPublicAddress (string), amount (number)"
                    .to_string()
            )));
        };

        let Value::Number(amount) = amount else {
            return Err(report!(Error::ValidationError(
                "amount must be a number".to_string()
            )));
        };

        let input_token = parse_evm_address(input_token).change_context(
            Error::ValidationError("Invalid inputToken address provided.".to_string()),
        )?;
        let user = parse_evm_address(user).change_context(Error::ValidationError(
            "Invalid userPublicAddress provided.".to_string(),
        ))?;

        let amount = number_to_decimal(amount)?;
        if amount <= Decimal::ZERO {
            return Err(report!(Error::ValidationError(
                "amount must be a positive number".to_string()
            )));
        }

        Ok(ValidatedDeposit {
            input_token,
            user,
            amount,
        })
    }
}

/// Converts a JSON number into an exact decimal, using the number's original text.
fn number_to_decimal(number: &Number) -> ModelResult<Decimal> {
    let text = number.to_string();
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text.replace("e+", "e").replace("E+", "E"))
    } else {
        Decimal::from_str_exact(&text)
    };

    parsed
        .change_context(Error::ValidationError(
            "amount is not representable".to_string(),
        ))
        .attach_printable_lazy(|| format!("amount: {text}"))
}
