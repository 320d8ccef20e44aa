/// Errors produced while resolving and running a conversion.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid numeric input: {0}")]
    InvalidNumericInput(String),

    #[error("Unsupported conversion: \"{from}\" to \"{to}\"")]
    UnsupportedConversion { from: String, to: String },

    #[error("Quote service error: {0}")]
    QuoteServiceError(String),

    #[error("Malformed quote response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    NetworkFailure(String),

    #[error("Settings error: {0}")]
    PersistenceFailure(String),

    #[error("Not a conversion command: \"{0}\"")]
    UnknownCommand(String),

    #[error("Unknown format type: \"{0}\"")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
