//! Deterministic parameters for the universal hash family used to emulate random permutations.

use crate::MinHashError;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// The Mersenne prime `2^61 - 1` used as the modulus of the universal hash family.
pub const MERSENNE_PRIME: u64 = (1 << 61) - 1;

/// The largest number of permutations a sketch may use. The count is stored in a 4-byte field.
pub const MAX_PERMUTATION_COUNT: usize = u32::MAX as usize;

/// The parameters `(a, b)` of `permutation_count` hash functions `x -> (a * x + b) mod M`.
///
/// The parameters are drawn from a generator seeded only by the sketch seed, so the same seed and
/// count always yield the same parameters. `a` is drawn from `[1, M)` and `b` from `[0, M)`.
///
/// # Examples
///
/// ```
/// use minhash_sketch::permutation::Permutations;
///
/// let permutations = Permutations::new(1, 128).unwrap();
/// assert_eq!(permutations.len(), 128);
/// assert_eq!(permutations, Permutations::new(1, 128).unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutations {
    a: Vec<u64>,
    b: Vec<u64>,
}

impl Permutations {
    /// Generates `permutation_count` hash function parameters from `seed`.
    ///
    /// # Errors
    ///
    /// Returns `MinHashError::InvalidArgument` if `permutation_count` is zero or greater than
    /// `MAX_PERMUTATION_COUNT`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::permutation::Permutations;
    ///
    /// assert!(Permutations::new(1, 0).is_err());
    /// assert!(Permutations::new(1, 1).is_ok());
    /// ```
    pub fn new(seed: i64, permutation_count: usize) -> Result<Self, MinHashError> {
        if permutation_count == 0 {
            return Err(MinHashError::InvalidArgument(
                "permutation count must be positive",
            ));
        }
        if permutation_count > MAX_PERMUTATION_COUNT {
            return Err(MinHashError::InvalidArgument(
                "permutation count must fit in 32 bits",
            ));
        }

        Ok(Self::generate(seed, permutation_count))
    }

    pub(crate) fn generate(seed: i64, permutation_count: usize) -> Self {
        let mut rng = XorShiftRng::seed_from_u64(seed as u64);
        let mut a = Vec::with_capacity(permutation_count);
        let mut b = Vec::with_capacity(permutation_count);
        for _ in 0..permutation_count {
            a.push(rng.gen_range(1, MERSENNE_PRIME));
            b.push(rng.gen_range(0, MERSENNE_PRIME));
        }
        Permutations { a, b }
    }

    /// Returns the number of hash functions.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Returns `true` if there are no hash functions. A family built by `new` is never empty.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Returns the `(a, b)` parameters of the hash function at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> (u64, u64) {
        (self.a[index], self.b[index])
    }

    /// Returns an iterator over the `(a, b)` parameters in slot order.
    ///
    /// # Examples
    ///
    /// ```
    /// use minhash_sketch::permutation::{Permutations, MERSENNE_PRIME};
    ///
    /// let permutations = Permutations::new(7, 16).unwrap();
    /// for (a, b) in permutations.iter() {
    ///     assert!(1 <= a && a < MERSENNE_PRIME);
    ///     assert!(b < MERSENNE_PRIME);
    /// }
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.a.iter().copied().zip(self.b.iter().copied())
    }
}

// a < 2^61 and value < 2^32, so the product needs more than 64 bits.
#[inline]
pub(crate) fn permute(a: u64, b: u64, value: u32) -> u32 {
    let product = u128::from(a) * u128::from(value) + u128::from(b);
    (product % u128::from(MERSENNE_PRIME)) as u32
}
