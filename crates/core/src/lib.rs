//! Core library for aconv
//!
//! This crate implements the **Functional Core** of the aconv application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The aconv project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`aconv_core`** (this crate): Conversion rules, rate caching and formatting with zero I/O
//! - **`aconv`**: CLI parsing, the settings file, HTTP and logging (the Imperative Shell)
//!
//! Anything that touches the outside world is reached through a trait the shell
//! implements: [`store::KeyValueStore`] for persisted settings,
//! [`quote::QuoteFetcher`] for the quote service and [`diagnostics::Diagnostics`]
//! for log lines. Tests in this crate plug in in-memory stand-ins.
//!
//! # Module Organization
//!
//! - [`registry`]: Conversion rules, lookup and introspection
//! - [`currencies`]: Static table of supported currency codes
//! - [`rates`]: Rate provider that serves cached rates and refreshes stale ones
//! - [`cache`]: Rate cache over a key/value store, with staleness policy
//! - [`quote`]: Quote service request and response handling
//! - [`store`]: Key/value settings store interface and its text format
//! - [`format`]: Output templates
//! - [`command`]: `<from>2<to>` command parsing
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use aconv_core::rates::NoRates;
//! use aconv_core::registry::Registry;
//!
//! let registry = Registry::new();
//! let hex = registry.convert("dec", "hex", "255", &mut NoRates)?;
//! assert_eq!(hex, "ff");
//! ```

pub mod cache;
pub mod command;
pub mod currencies;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod quote;
pub mod rates;
pub mod registry;
pub mod store;

pub use error::{Error, Result};
