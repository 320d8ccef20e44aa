use aconv_core::quote::{quote_query, QuoteFetcher};
use aconv_core::{Error, Result};

pub const DEFAULT_QUOTE_URL: &str = "http://www.google.com/ig/calculator";

const USER_AGENT: &str = concat!("aconv/", env!("CARGO_PKG_VERSION"));

/// Full request URL for one `from` to `to` quote.
pub fn quote_url(base_url: &str, from: &str, to: &str) -> String {
    format!(
        "{}?hl=en&q={}",
        base_url.trim_end_matches('?'),
        urlencoding::encode(&quote_query(from, to))
    )
}

/// Blocking HTTP client for the quote service.
#[derive(Debug, Clone)]
pub struct HttpQuoteFetcher {
    base_url: String,
}

impl HttpQuoteFetcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

impl QuoteFetcher for HttpQuoteFetcher {
    fn fetch_quote(&self, from: &str, to: &str) -> Result<String> {
        let url = quote_url(&self.base_url, from, to);
        log::debug!("Fetching quote from {url}");

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::NetworkFailure(format!("Failed to build HTTP client: {e}")))?;

        let response = client.get(&url).send().map_err(|e| {
            Error::NetworkFailure(format!("Failed to fetch quote for {from} to {to}: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(Error::NetworkFailure(format!(
                "Quote service returned HTTP {}",
                response.status()
            )));
        }

        response
            .text()
            .map_err(|e| Error::NetworkFailure(format!("Failed to read quote response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_url_default() {
        assert_eq!(
            quote_url(DEFAULT_QUOTE_URL, "eur", "usd"),
            "http://www.google.com/ig/calculator?hl=en&q=1EUR%3D%3FUSD"
        );
    }

    #[test]
    fn test_quote_url_trailing_question_mark() {
        assert_eq!(
            quote_url("http://localhost:8080/quote?", "GBP", "CNY"),
            "http://localhost:8080/quote?hl=en&q=1GBP%3D%3FCNY"
        );
    }

    #[test]
    fn test_fetch_unreachable_host_is_network_failure() {
        // Port 9 on localhost (discard) is not expected to serve HTTP.
        let fetcher = HttpQuoteFetcher::new("http://127.0.0.1:9/quote");
        let err = fetcher.fetch_quote("EUR", "USD").unwrap_err();
        assert!(matches!(err, Error::NetworkFailure(_)));
    }
}
