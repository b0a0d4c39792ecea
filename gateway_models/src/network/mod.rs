pub mod client_rate_limit;
pub mod http;

use std::{num::NonZeroU32, time::Duration};

use crate::error::{Error, ModelResult};
use error_stack::report;
use serde::de::DeserializeOwned;

pub const DEFAULT_MAX_JSON_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitWindow {
    PerSecond(NonZeroU32),
    PerMinute(NonZeroU32),
    Custom { period: Duration },
}

impl RateLimitWindow {
    /// - `<n>s` → PerSecond(n)
    /// - `<n>m` → PerMinute(n)
    /// - `<n>h` → one request every `n` hours
    /// - `<n>ms` → one request every `n` milliseconds
    pub fn from_string(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(millis) = s.strip_suffix("ms") {
            let millis: u64 = millis.parse().ok().filter(|n| *n > 0)?;
            return Some(RateLimitWindow::Custom {
                period: Duration::from_millis(millis),
            });
        }

        let unit = s.chars().last()?;
        let number: u32 = s[..s.len() - unit.len_utf8()].parse().ok()?;
        let number = NonZeroU32::new(number)?;

        match unit {
            's' => Some(RateLimitWindow::PerSecond(number)),
            'm' => Some(RateLimitWindow::PerMinute(number)),
            'h' => Some(RateLimitWindow::Custom {
                period: Duration::from_secs(u64::from(number.get()) * 3600),
            }),
            _ => None,
        }
    }
}

/// Returns the deepest object/array nesting of a raw JSON payload without parsing it.
///
/// Scanning stops as soon as `max_json_depth` is exceeded.
fn json_nesting_depth(data: &[u8], max_json_depth: usize) -> ModelResult<usize> {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (position, byte) in data.iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
                if deepest > max_json_depth {
                    return Err(report!(Error::SerdeDeserialize(format!(
                        "JSON depth limit exceeded at position {position}: max {max_json_depth}"
                    ))));
                }
            }
            b'}' | b']' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    report!(Error::SerdeDeserialize(format!(
                        "Invalid JSON: unmatched closing bracket at position {position}"
                    )))
                })?;
            }
            _ => {}
        }
    }

    if in_string {
        return Err(report!(Error::SerdeDeserialize(
            "Invalid JSON: unterminated string literal".to_string()
        )));
    }
    if depth != 0 {
        return Err(report!(Error::SerdeDeserialize(format!(
            "Invalid JSON: {depth} unmatched opening brackets"
        ))));
    }

    Ok(deepest)
}

/// Parses an inbound request body after enforcing a size cap and a nesting cap.
pub fn validate_and_parse_json<T>(
    data: &[u8],
    max_request_body_size: usize,
    max_json_depth: usize,
) -> ModelResult<T>
where
    T: DeserializeOwned,
{
    if data.len() > max_request_body_size {
        return Err(report!(Error::TooLargeRequestBody(format!(
            "Request too large: {} bytes (max: {max_request_body_size})",
            data.len()
        ))));
    }

    json_nesting_depth(data, max_json_depth)?;

    serde_json::from_slice(data)
        .map_err(|e| report!(Error::SerdeDeserialize(format!("JSON parsing error: {e}"))))
}
