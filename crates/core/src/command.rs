use crate::format::OutputFormat;
use crate::{Error, Result};

/// Splits a `<from>2<to>` command such as `hex2bin` or `eur2usd`.
///
/// None of the supported unit names contain a `2`, so the split is unambiguous.
pub fn parse_conversion_command(command: &str) -> Result<(String, String)> {
    let mut parts = command.split('2');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(from), Some(to), None) if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(Error::UnknownCommand(command.to_string())),
    }
}

/// A conversion request resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub from: String,
    pub to: String,
    pub format: OutputFormat,
}

/// Resolves the command, the reverse flag and the format name into a request.
pub fn resolve_conversion(command: &str, reverse: bool, format: &str) -> Result<ConversionRequest> {
    let (mut from, mut to) = parse_conversion_command(command)?;
    if reverse {
        std::mem::swap(&mut from, &mut to);
    }
    let format = format.parse()?;

    Ok(ConversionRequest { from, to, format })
}
