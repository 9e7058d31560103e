//! Error type shared by every fallible sketch operation.

use thiserror::Error;

/// Errors returned by `MinHash` construction, combination, and encoding.
///
/// No operation that returns an error leaves any of its operands partially modified.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MinHashError {
    /// A constructor or digestion input was out of range, or a sketch has more permutations than
    /// the signed 32-bit count field of the binary encoding can hold.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Two or more sketches were combined that do not share a seed and a permutation count.
    #[error("incompatible sketch: {0}")]
    IncompatibleSketch(&'static str),
    /// The destination buffer cannot hold the encoded sketch.
    #[error("buffer too small: {required} bytes required, {actual} bytes available")]
    BufferTooSmall {
        /// Number of bytes the encoded sketch occupies.
        required: usize,
        /// Number of bytes available in the buffer.
        actual: usize,
    },
    /// The bytes being decoded do not describe a valid sketch.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(&'static str),
}
