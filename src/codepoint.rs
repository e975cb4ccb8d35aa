//! Code-point vectorization.
//!
//! Maps text to the Unicode scalar values of its characters and back.
//! No normalization is applied: each `char` becomes exactly one integer.

/// Sample input used by the `codepoints` command when no text is given.
pub const SAMPLE_TEXT: &str = "Hello, World!";

/// Error type for code-point decoding
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodePointError {
    #[error("Value {value:#x} at position {index} is not a Unicode scalar value")]
    InvalidScalar { index: usize, value: u32 },
}

/// Convert text into the list of code points of its characters.
///
/// The result has one element per character, in the original order.
/// Empty input gives an empty vector.
pub fn vectorize(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

/// Rebuild text from a list of code points.
///
/// Fails on the first value that is not a Unicode scalar value
/// (surrogates or anything above `U+10FFFF`).
pub fn devectorize(codes: &[u32]) -> Result<String, CodePointError> {
    codes
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            char::from_u32(value).ok_or(CodePointError::InvalidScalar { index, value })
        })
        .collect()
}
