use crate::permutation::{self, Permutations};
use crate::util;
use crate::MinHashError;
use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::cmp;
#[cfg(feature = "serde")]
use std::convert::TryFrom;
use std::hash::Hash;

/// The value of every slot in an empty `MinHash`. Permuted hashes are truncated to 32 bits, so no
/// digested item can produce a larger value.
pub const MAX_HASH: u32 = u32::MAX;

/// The number of permutations used by `MinHash::default`.
pub const DEFAULT_PERMUTATION_COUNT: usize = 128;

/// The seed used by `MinHash::new` and `MinHash::default`.
pub const DEFAULT_SEED: i64 = 1;

/// `MinHash` is a sketch of a set that can estimate the Jaccard Similarity between two sets and
/// the cardinality of a set without storing the items of the set.
///
/// Each of the `permutation_count` slots simulates a random permutation of the 32-bit hash space
/// with a universal hash function `x -> ((a * x + b) mod M) & 0xFFFF_FFFF`, where `M` is the
/// Mersenne prime `2^61 - 1`, and keeps the minimum permuted value of every item digested so far.
/// The probability that two sets agree on a slot is equal to their Jaccard Similarity, so the
/// fraction of agreeing slots is an unbiased estimate of it with a standard error of
/// `O(1 / sqrt(permutation_count))`.
///
/// Two sketches can only be compared or combined if they share a seed and a permutation count.
///
/// # Examples
///
/// ```
/// use minhash_sketch::similarity::MinHash;
///
/// let mut m1 = MinHash::new(256).unwrap();
/// let mut m2 = MinHash::new(256).unwrap();
///
/// for item in "the cat sat on a mat".split(' ') {
///     m1.update(item);
/// }
/// for item in "the cat sat on the mat".split(' ') {
///     m2.update(item);
/// }
///
/// let similarity = m1.jaccard(&m2).unwrap();
/// assert!(0.0 <= similarity && similarity <= 1.0);
///
/// m1.merge(&m2).unwrap();
/// assert!(m1.jaccard(&m2).unwrap() >= similarity);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(
        crate = "serde_crate",
        try_from = "MinHashRepr",
        into = "MinHashRepr"
    )
)]
pub struct MinHash {
    seed: i64,
    permutations: Permutations,
    hash_values: Vec<u32>,
}

impl MinHash {
    /// Constructs a new, empty `MinHash` with `permutation_count` permutations and the default
    /// seed.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::InvalidArgument` if `permutation_count` is zero or does not fit in
    /// 32 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let min_hash = MinHash::new(128).unwrap();
    /// assert!(min_hash.is_empty());
    /// assert!(MinHash::new(0).is_err());
    /// ```
    pub fn new(permutation_count: usize) -> Result<Self, MinHashError> {
        Self::with_seed(permutation_count, DEFAULT_SEED)
    }

    /// Constructs a new, empty `MinHash` with `permutation_count` permutations derived from
    /// `seed`.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::InvalidArgument` if `permutation_count` is zero or does not fit in
    /// 32 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let min_hash = MinHash::with_seed(64, -7).unwrap();
    /// assert_eq!(min_hash.seed(), -7);
    /// assert_eq!(min_hash.permutation_count(), 64);
    /// ```
    pub fn with_seed(permutation_count: usize, seed: i64) -> Result<Self, MinHashError> {
        let permutations = Permutations::new(seed, permutation_count)?;
        debug!(
            "Constructed MinHash with {} permutations and seed {}.",
            permutation_count, seed
        );
        Ok(Self::from_permutations(seed, permutations))
    }

    pub(crate) fn from_permutations(seed: i64, permutations: Permutations) -> Self {
        MinHash {
            seed,
            hash_values: vec![MAX_HASH; permutations.len()],
            permutations,
        }
    }

    /// Digests the output of a hash function applied to an item. Only the first 4 bytes of
    /// `digest` are used, read as a little-endian unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::InvalidArgument` if `digest` is shorter than 4 bytes. The sketch is
    /// left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut min_hash = MinHash::new(128).unwrap();
    /// min_hash.digest(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
    /// assert!(!min_hash.is_empty());
    ///
    /// assert!(min_hash.digest(&[0xDE, 0xAD]).is_err());
    /// ```
    pub fn digest(&mut self, digest: &[u8]) -> Result<(), MinHashError> {
        let value = util::leading_word(digest).ok_or(MinHashError::InvalidArgument(
            "digest must be at least 4 bytes",
        ))?;
        self.digest_word(value);
        Ok(())
    }

    fn digest_word(&mut self, value: u32) {
        for (hash_value, (a, b)) in self.hash_values.iter_mut().zip(self.permutations.iter()) {
            *hash_value = cmp::min(*hash_value, permutation::permute(a, b, value));
        }
    }

    /// Hashes `item` with a fixed-key SipHash and digests the result. Use `digest` to supply a
    /// different hash function.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut m1 = MinHash::new(128).unwrap();
    /// let mut m2 = MinHash::new(128).unwrap();
    ///
    /// m1.update("foo");
    /// m1.update("bar");
    /// m2.update("bar");
    /// m2.update("foo");
    ///
    /// assert_eq!(m1, m2);
    /// ```
    pub fn update<U>(&mut self, item: &U)
    where
        U: Hash + ?Sized,
    {
        let digest = util::item_digest(item);
        self.digest_word(LittleEndian::read_u32(&digest[..4]));
    }

    pub(crate) fn check_compatible(&self, other: &MinHash) -> Result<(), MinHashError> {
        if self.seed != other.seed {
            return Err(MinHashError::IncompatibleSketch(
                "sketches have different seeds",
            ));
        }
        if self.hash_values.len() != other.hash_values.len() {
            return Err(MinHashError::IncompatibleSketch(
                "sketches have different numbers of permutations",
            ));
        }
        Ok(())
    }

    /// Merges `other` into `self`, making `self` the sketch of the union of both sets. `other` is
    /// not modified.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::IncompatibleSketch` if the seeds or the permutation counts differ.
    /// `self` is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut m1 = MinHash::new(128).unwrap();
    /// m1.update("foo");
    ///
    /// let mut m2 = MinHash::new(128).unwrap();
    /// m2.update("bar");
    ///
    /// let mut expected = MinHash::new(128).unwrap();
    /// expected.update("foo");
    /// expected.update("bar");
    ///
    /// m1.merge(&m2).unwrap();
    /// assert_eq!(m1, expected);
    /// ```
    pub fn merge(&mut self, other: &MinHash) -> Result<(), MinHashError> {
        self.check_compatible(other)?;
        trace!(
            "Merging MinHash sketches with {} permutations.",
            self.hash_values.len()
        );
        for (value, other_value) in self.hash_values.iter_mut().zip(&other.hash_values) {
            *value = cmp::min(*value, *other_value);
        }
        Ok(())
    }

    /// Returns a new `MinHash` that is the sketch of the union of all sets in `sketches`. None of
    /// the inputs are modified.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::IncompatibleSketch` if fewer than two sketches are given, or if the
    /// sketches do not all share a seed and a permutation count.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut m1 = MinHash::new(128).unwrap();
    /// m1.update("foo");
    /// let mut m2 = MinHash::new(128).unwrap();
    /// m2.update("bar");
    /// let mut m3 = MinHash::new(128).unwrap();
    /// m3.update("baz");
    ///
    /// let union = MinHash::union(&[&m1, &m2, &m3]).unwrap();
    ///
    /// let mut expected = MinHash::new(128).unwrap();
    /// for item in &["foo", "bar", "baz"] {
    ///     expected.update(item);
    /// }
    /// assert_eq!(union, expected);
    /// ```
    pub fn union(sketches: &[&MinHash]) -> Result<MinHash, MinHashError> {
        if sketches.len() < 2 {
            return Err(MinHashError::IncompatibleSketch(
                "cannot union fewer than two sketches",
            ));
        }
        let first = sketches[0];
        for sketch in &sketches[1..] {
            first.check_compatible(sketch)?;
        }

        debug!(
            "Computing the union of {} MinHash sketches with {} permutations.",
            sketches.len(),
            first.hash_values.len()
        );
        let mut ret = first.clone();
        for sketch in &sketches[1..] {
            for (value, other_value) in ret.hash_values.iter_mut().zip(&sketch.hash_values) {
                *value = cmp::min(*value, *other_value);
            }
        }
        Ok(ret)
    }

    /// Returns the estimated Jaccard Similarity between the sets sketched by `self` and `other`:
    /// the fraction of slots holding equal minimum hash values.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::IncompatibleSketch` if the seeds or the permutation counts differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut m1 = MinHash::new(128).unwrap();
    /// m1.update("foo");
    ///
    /// assert_eq!(m1.jaccard(&m1).unwrap(), 1.0);
    ///
    /// let m2 = MinHash::with_seed(128, 2).unwrap();
    /// assert!(m1.jaccard(&m2).is_err());
    /// ```
    pub fn jaccard(&self, other: &MinHash) -> Result<f64, MinHashError> {
        self.check_compatible(other)?;
        let matches = self
            .hash_values
            .iter()
            .zip(&other.hash_values)
            .filter(|(value, other_value)| value == other_value)
            .count();
        Ok(matches as f64 / self.hash_values.len() as f64)
    }

    /// Returns the estimated number of distinct items digested into the `MinHash`.
    ///
    /// The estimate is `k / sum(hash_values[i] / MAX_HASH) - 1` for `k` permutations. It is not
    /// bias-corrected and degrades for very small or very large cardinalities.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut min_hash = MinHash::new(1024).unwrap();
    /// assert_eq!(min_hash.count(), 0.0);
    ///
    /// for item in 0..1000u32 {
    ///     min_hash.update(&item);
    /// }
    /// assert!((min_hash.count() - 1000.0).abs() < 250.0);
    /// ```
    pub fn count(&self) -> f64 {
        let len = self.hash_values.len() as f64;
        let sum = self
            .hash_values
            .iter()
            .map(|value| f64::from(*value) / f64::from(MAX_HASH))
            .sum::<f64>();
        len / sum - 1.0
    }

    /// Returns `true` if no item has been digested into the `MinHash`, that is, if every slot
    /// still holds `MAX_HASH`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let mut min_hash = MinHash::new(128).unwrap();
    /// assert!(min_hash.is_empty());
    ///
    /// min_hash.update("foo");
    /// assert!(!min_hash.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.hash_values.iter().all(|value| *value == MAX_HASH)
    }

    /// Returns the seed the permutations were derived from.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Returns the number of permutations used by the `MinHash`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::similarity::MinHash;
    ///
    /// let min_hash = MinHash::new(100).unwrap();
    /// assert_eq!(min_hash.permutation_count(), 100);
    /// ```
    pub fn permutation_count(&self) -> usize {
        self.hash_values.len()
    }

    /// Returns the minimum permuted hash value of every slot.
    pub fn hash_values(&self) -> &[u32] {
        &self.hash_values
    }

    pub(crate) fn hash_values_mut(&mut self) -> &mut [u32] {
        &mut self.hash_values
    }

    /// Returns the permutation parameters of the `MinHash`.
    pub fn permutations(&self) -> &Permutations {
        &self.permutations
    }
}

impl Default for MinHash {
    fn default() -> Self {
        Self::from_permutations(
            DEFAULT_SEED,
            Permutations::generate(DEFAULT_SEED, DEFAULT_PERMUTATION_COUNT),
        )
    }
}

impl PartialEq for MinHash {
    fn eq(&self, other: &MinHash) -> bool {
        self.seed == other.seed && self.hash_values == other.hash_values
    }
}

// Permutations are a function of the seed and the slot count, so only those are persisted and the
// parameters are derived again on the way in.
#[cfg(feature = "serde")]
#[derive(Deserialize, Serialize)]
#[serde(crate = "serde_crate")]
struct MinHashRepr {
    seed: i64,
    hash_values: Vec<u32>,
}

#[cfg(feature = "serde")]
impl From<MinHash> for MinHashRepr {
    fn from(min_hash: MinHash) -> Self {
        MinHashRepr {
            seed: min_hash.seed,
            hash_values: min_hash.hash_values,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<MinHashRepr> for MinHash {
    type Error = MinHashError;

    fn try_from(repr: MinHashRepr) -> Result<Self, Self::Error> {
        let permutations = Permutations::new(repr.seed, repr.hash_values.len())?;
        Ok(MinHash {
            seed: repr.seed,
            permutations,
            hash_values: repr.hash_values,
        })
    }
}
