use crate::error::{Error, GatewayResult};
use alloy_primitives::U256;
use error_stack::report;
use rust_decimal::Decimal;

/// Converts a human amount into the token's smallest unit: `amount × 10^decimals`.
///
/// Integer arithmetic only. An amount with more fractional digits than the
/// token supports is rejected instead of truncated.
pub fn decimal_to_base_units(amount: Decimal, decimals: u8) -> GatewayResult<U256> {
    if amount.is_sign_negative() {
        return Err(report!(Error::InvalidArgument(
            "amount must be a positive number".to_string()
        )));
    }

    let normalized = amount.normalize();
    let scale = normalized.scale();
    if scale > u32::from(decimals) {
        return Err(report!(Error::InvalidArgument(format!(
            "amount has {scale} fractional digits but the token only supports {decimals}"
        ))));
    }

    // Non-negative, so the mantissa fits in u128
    let mantissa = U256::from(normalized.mantissa().unsigned_abs());
    let exponent = U256::from(u32::from(decimals) - scale);

    U256::from(10u8)
        .checked_pow(exponent)
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(|| {
            report!(Error::InvalidArgument(
                "amount is too large for the token".to_string()
            ))
        })
}

/// Renders a base-unit amount as a decimal string in whole units.
///
/// At least one fractional digit is always written, e.g. `"1.0"` or `"0.5"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = usize::from(decimals);

    let padded = if digits.len() <= decimals {
        format!("{}{digits}", "0".repeat(decimals - digits.len() + 1))
    } else {
        digits
    };

    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{integer}.0")
    } else {
        format!("{integer}.{fraction}")
    }
}
