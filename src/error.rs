// Crate-wide error type for fallible, caller-facing failures: malformed
// or truncated container/PPM input, and out-of-range image dimensions.
//
// Quantizer overflow and bit-packer shift-range violations are *not*
// represented here -- they indicate a bug in this crate's own pipeline,
// not a problem with the caller's input, so they surface as panics
// (see bitpack.rs).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
  #[error("input validation failed: {0}")]
  InputValidation(String),

  #[error("truncated input: {0}")]
  TruncatedInput(String),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}
