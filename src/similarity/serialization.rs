//! Fixed-width binary encoding of a `MinHash`.
//!
//! The layout has no padding and uses the native byte order of the machine, so it is meant for
//! persisting sketches and exchanging them between processes on the same platform:
//!
//! ```text
//! [ seed: i64 ][ permutation_count: i32 ][ hash_values: permutation_count * u32 ]
//! ```
//!
//! Permutation parameters are not stored. They are derived again from the seed when decoding.

use super::MinHash;
use crate::permutation::Permutations;
use crate::MinHashError;
use byteorder::{ByteOrder, NativeEndian};
use log::debug;
use std::mem;

const SEED_SIZE: usize = mem::size_of::<i64>();
const COUNT_SIZE: usize = mem::size_of::<i32>();
const HASH_VALUE_SIZE: usize = mem::size_of::<u32>();

/// The number of bytes preceding the hash values in an encoded `MinHash`.
pub const HEADER_SIZE: usize = SEED_SIZE + COUNT_SIZE;

fn header_count(permutation_count: usize) -> Result<i32, MinHashError> {
    if permutation_count > i32::MAX as usize {
        return Err(MinHashError::InvalidArgument(
            "permutation count does not fit in the encoded header",
        ));
    }
    Ok(permutation_count as i32)
}

fn encoded_size(permutation_count: usize) -> Option<usize> {
    permutation_count
        .checked_mul(HASH_VALUE_SIZE)
        .and_then(|payload| payload.checked_add(HEADER_SIZE))
}

impl MinHash {
    /// Returns the number of bytes needed to encode the `MinHash`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let min_hash = MinHash::new(128).unwrap();
    /// assert_eq!(min_hash.byte_size(), 8 + 4 + 128 * 4);
    /// ```
    pub fn byte_size(&self) -> usize {
        HEADER_SIZE + self.permutation_count() * HASH_VALUE_SIZE
    }

    /// Encodes the `MinHash` into the start of `buf` and returns the number of bytes written.
    /// Bytes past `byte_size()` are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::BufferTooSmall` if `buf` is shorter than `byte_size()`, and
    /// `MinHashError::InvalidArgument` if the permutation count does not fit in the signed 32-bit
    /// header field. Nothing is written on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut min_hash = MinHash::new(16).unwrap();
    /// min_hash.update("foo");
    ///
    /// let mut buf = vec![0; 128];
    /// assert_eq!(min_hash.serialize_into(&mut buf).unwrap(), 76);
    ///
    /// assert!(min_hash.serialize_into(&mut [0; 16]).is_err());
    /// ```
    pub fn serialize_into(&self, buf: &mut [u8]) -> Result<usize, MinHashError> {
        let required = self.byte_size();
        if buf.len() < required {
            return Err(MinHashError::BufferTooSmall {
                required,
                actual: buf.len(),
            });
        }
        let permutation_count = header_count(self.permutation_count())?;

        NativeEndian::write_i64(&mut buf[..SEED_SIZE], self.seed());
        NativeEndian::write_i32(&mut buf[SEED_SIZE..HEADER_SIZE], permutation_count);
        NativeEndian::write_u32_into(self.hash_values(), &mut buf[HEADER_SIZE..required]);
        Ok(required)
    }

    /// Encodes the `MinHash` into a newly allocated buffer of exactly `byte_size()` bytes.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::InvalidArgument` if the permutation count does not fit in the
    /// signed 32-bit header field.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut min_hash = MinHash::new(128).unwrap();
    /// min_hash.update("foo");
    ///
    /// let bytes = min_hash.to_bytes().unwrap();
    /// assert_eq!(bytes.len(), min_hash.byte_size());
    /// assert_eq!(MinHash::deserialize(&bytes).unwrap(), min_hash);
    /// ```
    pub fn to_bytes(&self) -> Result<Vec<u8>, MinHashError> {
        let mut buf = vec![0; self.byte_size()];
        self.serialize_into(&mut buf)?;
        Ok(buf)
    }

    /// Decodes a `MinHash` from the start of `buf`. The permutations are derived again from the
    /// encoded seed and permutation count. Trailing bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::MalformedEncoding` if `buf` is shorter than the header, if the
    /// declared permutation count is not positive, or if `buf` is shorter than the header plus
    /// the declared number of hash values.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut min_hash = MinHash::with_seed(64, 42).unwrap();
    /// min_hash.update("foo");
    ///
    /// let bytes = min_hash.to_bytes().unwrap();
    /// let decoded = MinHash::deserialize(&bytes).unwrap();
    /// assert_eq!(decoded, min_hash);
    /// assert_eq!(decoded.seed(), 42);
    ///
    /// assert!(MinHash::deserialize(&bytes[..bytes.len() - 1]).is_err());
    /// ```
    pub fn deserialize(buf: &[u8]) -> Result<MinHash, MinHashError> {
        if buf.len() < HEADER_SIZE {
            return Err(MinHashError::MalformedEncoding(
                "buffer is shorter than the header",
            ));
        }
        let seed = NativeEndian::read_i64(&buf[..SEED_SIZE]);
        let permutation_count = NativeEndian::read_i32(&buf[SEED_SIZE..HEADER_SIZE]);
        if permutation_count <= 0 {
            return Err(MinHashError::MalformedEncoding(
                "declared permutation count is not positive",
            ));
        }
        let permutation_count = permutation_count as usize;
        let required = match encoded_size(permutation_count) {
            Some(required) if required <= buf.len() => required,
            _ => {
                return Err(MinHashError::MalformedEncoding(
                    "buffer is shorter than the declared permutation count",
                ))
            }
        };

        debug!(
            "Decoding MinHash with {} permutations and seed {}.",
            permutation_count, seed
        );
        let mut min_hash =
            MinHash::from_permutations(seed, Permutations::generate(seed, permutation_count));
        NativeEndian::read_u32_into(&buf[HEADER_SIZE..required], min_hash.hash_values_mut());
        Ok(min_hash)
    }
}
