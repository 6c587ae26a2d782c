use thiserror::Error;

/// Errors from parsing user-supplied numeric values.
#[derive(Debug, Error)]
pub enum NumberParseError {
    /// Nothing to parse
    #[error("Empty value")]
    Empty,

    /// Not a hex or decimal integer
    #[error("Invalid number: {0}")]
    Invalid(String),

    /// Parsed, but does not fit the target width
    #[error("Value {input} does not fit in {bits} bits")]
    OutOfRange { input: String, bits: u32 },
}
