use crate::diagnostics::LogDiagnostics;
use crate::fetch::HttpQuoteFetcher;
use crate::prelude::{println, *};
use crate::settings::FileStore;
use aconv_core::command::{resolve_conversion, ConversionRequest};
use aconv_core::rates::CachedRates;
use aconv_core::registry::Registry;

/// Handles `<from>2<to> <value>`.
pub fn run(command: &str, value: Option<&str>, global: &crate::Global) -> Result<()> {
    let value = value.ok_or_eyre("No value specified.")?;

    let ConversionRequest { from, to, format } =
        resolve_conversion(command, global.reverse, &global.format).map_err(|e| eyre!("{e}"))?;

    let registry = Registry::new();
    let store = FileStore::in_config_dir(global.config_dir.clone());
    let fetcher = HttpQuoteFetcher::new(&global.quote_url);
    let mut rates = CachedRates::new(store, fetcher, LogDiagnostics);

    log::debug!("Converting {value:?} from {from} to {to}");

    let result = registry
        .convert_formatted(format, &from, &to, value, &mut rates)
        .map_err(|e| eyre!("Could not convert input: {e}"))?;

    println!("{result}");

    Ok(())
}
