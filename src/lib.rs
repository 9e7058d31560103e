//! # minhash-sketch
//!
//! `minhash-sketch` contains a MinHash sketch: a fixed-size summary of a set that estimates the
//! Jaccard Similarity between sets and the cardinality of a set without retaining the items. The
//! error of the estimates shrinks with the number of permutations used, which makes the sketch
//! useful for big data and streaming applications where the sets themselves are too large to
//! store or compare.
//!
//! Items enter a sketch as digests: the output of any hash function applied to the item, of which
//! the first 4 bytes are used. Sketches sharing a seed and a permutation count can be merged,
//! compared, and encoded into a compact binary form.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! minhash-sketch = "*"
//! ```
//!
//! ```rust
//! use minhash_sketch::similarity::MinHash;
//!
//! let mut m1 = MinHash::new(128)?;
//! let mut m2 = MinHash::new(128)?;
//! for item in &["a", "b", "c"] {
//!     m1.update(item);
//! }
//! for item in &["a", "b", "c", "d"] {
//!     m2.update(item);
//! }
//!
//! let similarity = m1.jaccard(&m2)?;
//! assert!(0.0 <= similarity && similarity <= 1.0);
//!
//! let restored = MinHash::deserialize(&m1.to_bytes()?)?;
//! assert_eq!(restored, m1);
//! # Ok::<(), minhash_sketch::MinHashError>(())
//! ```
//!
//! ## References
//!
//!  - [On the resemblance and containment of documents](https://ieeexplore.ieee.org/document/666900)
//!  > Broder, Andrei Z. 1997. “On the Resemblance and Containment of Documents.” In *Proceedings of Compression and Complexity of SEQUENCES 1997*, 21–29. IEEE. doi:[10.1109/SEQUEN.1997.666900](https://doi.org/10.1109/SEQUEN.1997.666900).
//!  - [Estimating the size of the transitive closure in linear time](https://ieeexplore.ieee.org/document/365694)
//!  > Cohen, Edith. 1994. “Estimating the Size of the Transitive Closure in Linear Time.” In *Proceedings 35th Annual Symposium on Foundations of Computer Science*, 190–200. IEEE. doi:[10.1109/SFCS.1994.365694](https://doi.org/10.1109/SFCS.1994.365694).

#![warn(missing_docs)]

mod error;
pub mod permutation;
pub mod similarity;
mod util;

pub use crate::error::MinHashError;
