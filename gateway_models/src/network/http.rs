use crate::error::{Error, ModelResult};
use error_stack::{ResultExt, report};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::value::Value;
use tracing::error;

/// Converts a JSON object into a URL query string with keys sorted alphabetically.
///
/// `null` values are skipped and string values are written without quotes.
/// Values are not percent-encoded.
///
/// # Errors
///
/// Returns `Error::ParseError` if `value` is not a JSON object.
pub fn value_to_sorted_querystring(value: &Value) -> ModelResult<String> {
    let Value::Object(map) = value else {
        return Err(report!(Error::ParseError)
            .attach_printable(format!("Invalid JSON Object: {value:?}")));
    };

    let mut pairs: Vec<(&String, String)> = map
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| match v {
            Value::String(s) => (k, s.clone()),
            other => (k, other.to_string()),
        })
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    Ok(pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<String>>()
        .join("&"))
}

/// Reads the upstream body as text so it can be surfaced verbatim.
pub async fn read_error_body(response: Response) -> ModelResult<String> {
    response
        .text()
        .await
        .change_context(Error::ReqwestError(
            "Failed to get text from response".to_string(),
        ))
}

/// Deserializes a successful response, or fails with `Error::UpstreamStatus`
/// carrying the status code and raw body of an unsuccessful one.
pub async fn handle_reqwest_response<T: DeserializeOwned>(response: Response) -> ModelResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = read_error_body(response).await?;
        error!("Upstream error {}: {}", status.as_u16(), &body);
        return Err(report!(Error::UpstreamStatus {
            status: status.as_u16(),
            body,
        }));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    // JSON is assumed when the upstream does not say otherwise
    if !content_type.is_empty()
        && !content_type.contains("application/json")
        && !content_type.contains("text/")
    {
        return Err(report!(Error::ParseError)
            .attach_printable(format!("Unsupported Content-Type: {content_type}")));
    }

    let bytes = response.bytes().await.change_context(Error::ReqwestError(
        "Failed to read response body".to_string(),
    ))?;

    serde_json::from_slice(&bytes)
        .change_context(Error::SerdeDeserialize(
            "Failed to deserialize JSON".to_string(),
        ))
        .attach_printable_lazy(|| String::from_utf8_lossy(&bytes).into_owned())
}
