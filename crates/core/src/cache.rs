//! Exchange rate cache over a [`KeyValueStore`].
//!
//! Each currency pair occupies two properties under the `rates` category:
//! `<FROM>_<TO>` holds the rate and `<FROM>_<TO>_time` the fetch timestamp.

use crate::store::KeyValueStore;
use crate::Result;
use chrono::{DateTime, Duration, Utc};

/// Settings category that holds cached rates.
pub const RATES_CATEGORY: &str = "rates";

/// Maximum age, in minutes, of a cached rate before it is refreshed.
pub const FRESHNESS_WINDOW_MINUTES: i64 = 10;

pub fn freshness_window() -> Duration {
    Duration::minutes(FRESHNESS_WINDOW_MINUTES)
}

/// Cache key for a pair, uppercase so mixed-case callers share one entry.
pub fn pair_key(from: &str, to: &str) -> String {
    format!("{}_{}", from.to_uppercase(), to.to_uppercase())
}

fn time_key(pair_key: &str) -> String {
    format!("{pair_key}_time")
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedRate {
    pub pair_key: String,
    pub rate: f64,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CachedRate {
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.fetched_at.map(|fetched_at| now - fetched_at)
    }

    /// A rate is fresh when it was fetched less than [`freshness_window`] ago.
    ///
    /// Entries without a timestamp, or stamped in the future, are stale.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.age(now) {
            Some(age) => age >= Duration::zero() && age < freshness_window(),
            None => false,
        }
    }
}

pub struct RateCache<S> {
    store: S,
}

impl<S: KeyValueStore> RateCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lookup(&mut self, from: &str, to: &str) -> Result<Option<CachedRate>> {
        let pair_key = pair_key(from, to);
        let Some(rate) = self.store.value_f64(RATES_CATEGORY, &pair_key)? else {
            return Ok(None);
        };
        let fetched_at = self.store.value_time(RATES_CATEGORY, &time_key(&pair_key))?;

        Ok(Some(CachedRate {
            pair_key,
            rate,
            fetched_at,
        }))
    }

    pub fn insert(&mut self, from: &str, to: &str, rate: f64, fetched_at: DateTime<Utc>) -> Result<()> {
        let pair_key = pair_key(from, to);
        self.store.set_value_f64(RATES_CATEGORY, &pair_key, rate)?;
        self.store
            .set_value_time(RATES_CATEGORY, &time_key(&pair_key), fetched_at)
    }
}
