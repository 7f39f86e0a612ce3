//! Survey backend API clients.
//!
//! One submodule per endpoint. Each fetches its JSON payload with the
//! shared blocking client, checks the transport status and the backend's
//! own `success` flag, and normalizes the wire shapes into the canonical
//! `model` types - wire structs never leave this tree. Downstream code
//! therefore never branches on the backend's dual Chinese/English key
//! naming or its number-or-string cells.
//!
//! Submodules:
//! - `routes`     - `/api/routes`: the route listing + summary counters.
//! - `statistics` - `/api/detailed-statistics`: route counts per operator.
//! - `samples`    - `/api/sample-table`: the 24/25-trip sample quotas.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::model::FetchError;

pub mod routes;
pub mod samples;
pub mod statistics;

// ---------------------------------------------------------------------------
// Shared HTTP plumbing
// ---------------------------------------------------------------------------

/// Builds the blocking client shared by all endpoint fetches.
pub fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client, FetchError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Network(e.to_string()))
}

/// GET `url` and deserialize the JSON body, mapping each failure mode onto
/// the fetch-error taxonomy.
pub(crate) fn get_json<T: DeserializeOwned>(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<T, FetchError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(FetchError::Http(response.status().as_u16()));
    }

    response.json().map_err(|e| FetchError::Parse(e.to_string()))
}

/// Converts a `success: false` payload into the application-error variant,
/// preferring the backend's message when it sent one.
pub(crate) fn backend_error(error: Option<String>, endpoint: &str) -> FetchError {
    FetchError::Backend(error.unwrap_or_else(|| format!("{} reported failure", endpoint)))
}

// ---------------------------------------------------------------------------
// Wire helpers
// ---------------------------------------------------------------------------

/// A wire cell the backend serializes as either a number or free text
/// (vehicle counts, stop counts, trip frequencies).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumOrText {
    Num(f64),
    Text(String),
}

impl NumOrText {
    /// Canonical text form: integral numbers drop the fraction dot.
    pub(crate) fn into_text(self) -> String {
        match self {
            NumOrText::Num(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
            NumOrText::Num(n) => n.to_string(),
            NumOrText::Text(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_or_text_accepts_both_wire_forms() {
        let n: NumOrText = serde_json::from_str("42").unwrap();
        assert_eq!(n.into_text(), "42");
        let f: NumOrText = serde_json::from_str("12.5").unwrap();
        assert_eq!(f.into_text(), "12.5");
        let s: NumOrText = serde_json::from_str("\"約30\"").unwrap();
        assert_eq!(s.into_text(), "約30");
    }
}
