//! Quote service request and response handling
//!
//! The service answers with a JavaScript object literal rather than JSON:
//!
//! ```text
//! {lhs: "1 British pound",rhs: "9.2661276 Chinese yuan",error: "",icc: true}
//! ```
//!
//! Keys are quoted before handing the body to `serde_json`, and the rate is the
//! leading number of the `rhs` field.

use crate::{Error, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Transport for the quote service. Returns the raw response body.
pub trait QuoteFetcher {
    fn fetch_quote(&self, from: &str, to: &str) -> Result<String>;
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct QuoteResponse {
    pub lhs: String,
    pub rhs: String,
    pub error: String,
    pub icc: bool,
}

/// Query sent to the service: "1 FROM = ? TO", without spaces.
pub fn quote_query(from: &str, to: &str) -> String {
    format!("1{}=?{}", from.to_uppercase(), to.to_uppercase())
}

/// Matches a whole string literal, or a bare key outside of one.
fn unquoted_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""(?:[^"\\]|\\.)*"|\b(lhs|rhs|error|icc)\s*:"#).expect("valid key regex")
    })
}

/// Quotes the bare `lhs`, `rhs`, `error` and `icc` keys.
///
/// String literals are matched first and copied unchanged, so already-quoted
/// keys and key-like text inside values are left alone.
pub fn normalize_quote_body(body: &str) -> String {
    unquoted_key_regex()
        .replace_all(body, |caps: &Captures| match caps.get(1) {
            Some(key) => format!("\"{}\":", key.as_str()),
            None => caps[0].to_string(),
        })
        .into_owned()
}

pub fn parse_quote_response(body: &str) -> Result<QuoteResponse> {
    serde_json::from_str(&normalize_quote_body(body))
        .map_err(|e| Error::MalformedResponse(format!("{e}: {body}")))
}

/// Extracts the rate from a response body.
pub fn parse_quote_rate(body: &str) -> Result<f64> {
    let response = parse_quote_response(body)?;

    if !response.error.is_empty() {
        return Err(Error::QuoteServiceError(response.error));
    }

    let token = response
        .rhs
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::MalformedResponse("empty rhs field".to_string()))?;

    token
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite())
        .ok_or_else(|| Error::MalformedResponse(format!("invalid rate: {}", response.rhs)))
}
