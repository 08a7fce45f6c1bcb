use thiserror::Error;

/// Errors raised at the edges of the crate.
///
/// Hashing itself is total; these only come from argument validation, hex
/// parsing and the command line front end.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A hex digest did not have the expected number of characters.
    #[error("digest must be {expected} hex characters, got {len}")]
    InvalidDigestLength { expected: usize, len: usize },

    /// A hex digest contained a character outside `[0-9a-fA-F]`.
    #[error("invalid hex digit {found:?} at index {index}")]
    InvalidHexDigit { index: usize, found: char },

    /// The caller-provided output buffer cannot hold the encoded result.
    #[error("output buffer holds {available} bytes, {required} required")]
    OutputTooSmall { required: usize, available: usize },

    /// Text input was not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    NonUtf8Input(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
