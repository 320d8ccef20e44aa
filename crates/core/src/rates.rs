//! Rate providers consumed by currency rules.

use crate::cache::RateCache;
use crate::diagnostics::Diagnostics;
use crate::quote::{parse_quote_rate, QuoteFetcher};
use crate::store::KeyValueStore;
use crate::{Error, Result};
use chrono::{DateTime, Utc};

/// Source of exchange rates: how many `to` units one `from` unit buys.
pub trait RateProvider {
    fn rate(&mut self, from: &str, to: &str) -> Result<f64>;
}

/// Provider for conversions that never need a rate.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRates;

impl RateProvider for NoRates {
    fn rate(&mut self, from: &str, to: &str) -> Result<f64> {
        Err(Error::NetworkFailure(format!(
            "no rate source configured for {from} to {to}"
        )))
    }
}

pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Serves fresh rates from the cache and refetches missing or stale ones.
///
/// Cache read and write failures are reported through [`Diagnostics`] and do
/// not fail the conversion.
pub struct CachedRates<S, F, D> {
    cache: RateCache<S>,
    fetcher: F,
    diagnostics: D,
    clock: Clock,
}

impl<S, F, D> CachedRates<S, F, D>
where
    S: KeyValueStore,
    F: QuoteFetcher,
    D: Diagnostics,
{
    pub fn new(store: S, fetcher: F, diagnostics: D) -> Self {
        Self::with_clock(store, fetcher, diagnostics, Box::new(Utc::now))
    }

    pub fn with_clock(store: S, fetcher: F, diagnostics: D, clock: Clock) -> Self {
        Self {
            cache: RateCache::new(store),
            fetcher,
            diagnostics,
            clock,
        }
    }

    pub fn cache(&self) -> &RateCache<S> {
        &self.cache
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn fetch(&mut self, from: &str, to: &str, now: DateTime<Utc>) -> Result<f64> {
        let body = self.fetcher.fetch_quote(from, to)?;
        let rate = parse_quote_rate(&body)?;

        if let Err(e) = self.cache.insert(from, to, rate, now) {
            self.diagnostics
                .emit(&format!("could not cache rate for {from} to {to}: {e}"));
        }

        Ok(rate)
    }
}

impl<S, F, D> RateProvider for CachedRates<S, F, D>
where
    S: KeyValueStore,
    F: QuoteFetcher,
    D: Diagnostics,
{
    fn rate(&mut self, from: &str, to: &str) -> Result<f64> {
        let now = (self.clock)();

        match self.cache.lookup(from, to) {
            Ok(Some(cached)) if cached.is_fresh(now) => {
                self.diagnostics
                    .emit(&format!("using cached rate {} for {}", cached.rate, cached.pair_key));
                return Ok(cached.rate);
            }
            Ok(Some(cached)) => {
                self.diagnostics
                    .emit(&format!("cached rate for {} is stale", cached.pair_key));
            }
            Ok(None) => {}
            Err(e) => {
                self.diagnostics
                    .emit(&format!("could not read cached rate for {from} to {to}: {e}"));
            }
        }

        self.fetch(from, to, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RATES_CATEGORY;
    use crate::diagnostics::{Recorded, Silent};
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};
    use std::cell::Cell;
    use std::rc::Rc;

    struct StubFetcher {
        body: String,
        calls: Cell<usize>,
    }

    impl StubFetcher {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                calls: Cell::new(0),
            }
        }
    }

    impl QuoteFetcher for StubFetcher {
        fn fetch_quote(&self, _from: &str, _to: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.body.clone())
        }
    }

    /// Accepts reads but refuses every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn value(&mut self, _category: &str, _name: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set_value(&mut self, _category: &str, _name: &str, _value: &str) -> Result<()> {
            Err(Error::PersistenceFailure("read-only".to_string()))
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn fixed_clock(now: Rc<Cell<DateTime<Utc>>>) -> Clock {
        Box::new(move || now.get())
    }

    const BODY: &str = r#"{lhs: "1 Euro",rhs: "1.25 US dollars",error: "",icc: true}"#;

    // ============================================================================
    // CachedRates tests
    // ============================================================================

    #[test]
    fn test_miss_fetches_and_writes_through() {
        let now = Rc::new(Cell::new(start()));
        let mut rates = CachedRates::with_clock(
            MemoryStore::new(),
            StubFetcher::new(BODY),
            Silent,
            fixed_clock(now),
        );

        assert_eq!(rates.rate("EUR", "USD").unwrap(), 1.25);
        assert_eq!(rates.fetcher().calls.get(), 1);

        let rates_section = &rates.cache().store().sections()[RATES_CATEGORY];
        assert_eq!(rates_section["EUR_USD"], "1.25");
        assert_eq!(rates_section["EUR_USD_time"], "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_fresh_hit_never_fetches() {
        let now = Rc::new(Cell::new(start()));
        let mut rates = CachedRates::with_clock(
            MemoryStore::new(),
            StubFetcher::new(BODY),
            Silent,
            fixed_clock(now.clone()),
        );

        rates.rate("EUR", "USD").unwrap();
        now.set(start() + Duration::minutes(9));
        rates.rate("EUR", "USD").unwrap();
        rates.rate("eur", "usd").unwrap();

        assert_eq!(rates.fetcher().calls.get(), 1);
    }

    #[test]
    fn test_stale_entry_fetches_exactly_once() {
        let now = Rc::new(Cell::new(start()));
        let mut rates = CachedRates::with_clock(
            MemoryStore::new(),
            StubFetcher::new(BODY),
            Silent,
            fixed_clock(now.clone()),
        );

        rates.rate("EUR", "USD").unwrap();
        now.set(start() + Duration::minutes(10));
        rates.rate("EUR", "USD").unwrap();
        assert_eq!(rates.fetcher().calls.get(), 2);

        // Refetch reset the timestamp, so the entry is fresh again.
        now.set(start() + Duration::minutes(15));
        rates.rate("EUR", "USD").unwrap();
        assert_eq!(rates.fetcher().calls.get(), 2);
    }

    #[test]
    fn test_preloaded_store_is_served() {
        let mut store = MemoryStore::new();
        store.set_value(RATES_CATEGORY, "GBP_CNY", "9.5").unwrap();
        store
            .set_value(RATES_CATEGORY, "GBP_CNY_time", "2024-05-01T09:55:00+00:00")
            .unwrap();
        let mut rates = CachedRates::with_clock(
            store,
            StubFetcher::new(BODY),
            Silent,
            fixed_clock(Rc::new(Cell::new(start()))),
        );

        assert_eq!(rates.rate("gbp", "cny").unwrap(), 9.5);
        assert_eq!(rates.fetcher().calls.get(), 0);
    }

    #[test]
    fn test_corrupt_cache_entry_is_refetched() {
        let mut store = MemoryStore::new();
        store.set_value(RATES_CATEGORY, "EUR_USD", "garbage").unwrap();
        let diagnostics = Recorded::default();
        let mut rates = CachedRates::with_clock(
            store,
            StubFetcher::new(BODY),
            &diagnostics,
            fixed_clock(Rc::new(Cell::new(start()))),
        );

        assert_eq!(rates.rate("EUR", "USD").unwrap(), 1.25);
        assert_eq!(rates.fetcher().calls.get(), 1);
        assert!(diagnostics.lines()[0].contains("could not read cached rate"));
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let diagnostics = Recorded::default();
        let mut rates = CachedRates::with_clock(
            ReadOnlyStore,
            StubFetcher::new(BODY),
            &diagnostics,
            fixed_clock(Rc::new(Cell::new(start()))),
        );

        assert_eq!(rates.rate("EUR", "USD").unwrap(), 1.25);
        assert_eq!(diagnostics.lines().len(), 1);
        assert!(diagnostics.lines()[0].contains("could not cache rate"));
    }

    #[test]
    fn test_service_error_is_not_cached() {
        let mut rates = CachedRates::with_clock(
            MemoryStore::new(),
            StubFetcher::new(r#"{"error":"bad"}"#),
            Silent,
            fixed_clock(Rc::new(Cell::new(start()))),
        );

        let err = rates.rate("EUR", "USD").unwrap_err();
        assert!(matches!(err, Error::QuoteServiceError(ref m) if m == "bad"));
        assert_eq!(rates.cache().store().writes(), 0);
    }

    #[test]
    fn test_no_rates() {
        assert!(matches!(
            NoRates.rate("EUR", "USD"),
            Err(Error::NetworkFailure(_))
        ));
    }
}
