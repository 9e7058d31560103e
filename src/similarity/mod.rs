//! Module for estimating similarities and cardinalities of sets.

mod min_hash;
pub mod serialization;

pub use self::min_hash::{MinHash, DEFAULT_PERMUTATION_COUNT, DEFAULT_SEED, MAX_HASH};

use crate::MinHashError;
use std::collections::HashSet;
use std::hash::Hash;
use std::iter::FromIterator;

/// Returns the estimated Jaccard Similarity of all sets sketched by `sketches`.
///
/// For two sketches this is the same as `MinHash::jaccard`. For more than two sketches it is the
/// fraction of slots on which every sketch holds the same minimum hash value, an
/// intersection-over-union generalization whose accuracy has not been validated against exact
/// values.
///
/// # Errors
///
/// Returns `MinHashError::IncompatibleSketch` if fewer than two sketches are given, or if the
/// sketches do not all share a seed and a permutation count.
///
/// # Examples
///
/// ```
/// use minhash_sketch::similarity::{jaccard, MinHash};
///
/// let mut m1 = MinHash::new(128).unwrap();
/// let mut m2 = MinHash::new(128).unwrap();
/// let mut m3 = MinHash::new(128).unwrap();
/// m1.update("foo");
/// m2.update("foo");
/// m3.update("foo");
///
/// assert_eq!(jaccard(&[&m1, &m2]).unwrap(), m1.jaccard(&m2).unwrap());
/// assert_eq!(jaccard(&[&m1, &m2, &m3]).unwrap(), 1.0);
/// assert!(jaccard(&[&m1]).is_err());
/// ```
pub fn jaccard(sketches: &[&MinHash]) -> Result<f64, MinHashError> {
    if sketches.len() < 2 {
        return Err(MinHashError::IncompatibleSketch(
            "cannot compare fewer than two sketches",
        ));
    }
    let first = sketches[0];
    let rest = &sketches[1..];
    for sketch in rest {
        first.check_compatible(sketch)?;
    }
    if rest.len() == 1 {
        return first.jaccard(rest[0]);
    }

    let matches = first
        .hash_values()
        .iter()
        .enumerate()
        .filter(|(index, value)| {
            rest.iter()
                .all(|sketch| sketch.hash_values()[*index] == **value)
        })
        .count();
    Ok(matches as f64 / first.permutation_count() as f64)
}

/// Computes the exact Jaccard Similarity between two iterators. The Jaccard Similarity is the
/// quotient between the intersection and the union. Useful as ground truth for the estimates of
/// a `MinHash`.
///
/// # Examples
///
/// ```
/// use minhash_sketch::similarity::get_jaccard_similarity;
///
/// assert_eq!(
///     get_jaccard_similarity(
///         "the cat sat on a mat".split(' '),
///         "the cat sat on the mat".split(' '),
///     ),
///     5.0 / 6.0,
/// );
/// ```
pub fn get_jaccard_similarity<T, U>(iter_1: T, iter_2: T) -> f64
where
    T: Iterator<Item = U>,
    U: Hash + Eq,
{
    let h1 = HashSet::<U>::from_iter(iter_1);
    let h2 = HashSet::<U>::from_iter(iter_2);

    (h1.intersection(&h2).count() as f64) / (h1.union(&h2).count() as f64)
}

#[cfg(test)]
mod tests {
    use super::{get_jaccard_similarity, jaccard, MinHash};
    use crate::MinHashError;

    static S1: &str = "the cat sat on a mat";
    static S2: &str = "the cat sat on the mat";
    static S3: &str = "we all scream for ice cream";

    fn sketch(permutation_count: usize, text: &str) -> MinHash {
        let mut min_hash = MinHash::new(permutation_count).unwrap();
        for word in text.split(' ') {
            min_hash.update(word);
        }
        min_hash
    }

    #[test]
    fn test_jaccard_similarity() {
        assert_eq!(
            get_jaccard_similarity(S1.split(' '), S2.split(' ')),
            5.0 / 6.0,
        );
        assert_eq!(get_jaccard_similarity(S1.split(' '), S3.split(' ')), 0.0);
    }

    #[test]
    fn test_jaccard_pairwise_regression() {
        for &(t1, t2) in &[(S1, S2), (S1, S3), (S2, S3), (S1, S1)] {
            let m1 = sketch(256, t1);
            let m2 = sketch(256, t2);
            assert_eq!(jaccard(&[&m1, &m2]).unwrap(), m1.jaccard(&m2).unwrap());
            assert_eq!(jaccard(&[&m2, &m1]).unwrap(), m2.jaccard(&m1).unwrap());
        }
    }

    #[test]
    fn test_jaccard_estimate() {
        let m1 = sketch(4096, S1);
        let m2 = sketch(4096, S2);
        let expected = get_jaccard_similarity(S1.split(' '), S2.split(' '));
        assert!((m1.jaccard(&m2).unwrap() - expected).abs() < 0.06);
    }

    #[test]
    fn test_jaccard_many() {
        let m1 = sketch(128, S1);
        let m2 = sketch(128, S1);
        let m3 = sketch(128, S1);
        assert_eq!(jaccard(&[&m1, &m2, &m3]).unwrap(), 1.0);

        let m4 = sketch(128, S2);
        let estimate = jaccard(&[&m1, &m2, &m4]).unwrap();
        assert!(estimate <= m1.jaccard(&m4).unwrap());
    }

    #[test]
    fn test_jaccard_invalid() {
        let m1 = sketch(128, S1);
        let m2 = MinHash::with_seed(128, 2).unwrap();
        let m3 = MinHash::new(64).unwrap();

        assert_eq!(
            jaccard(&[&m1]),
            Err(MinHashError::IncompatibleSketch(
                "cannot compare fewer than two sketches"
            )),
        );
        assert!(jaccard(&[]).is_err());
        assert!(jaccard(&[&m1, &m2]).is_err());
        assert!(jaccard(&[&m1, &m1, &m3]).is_err());
    }
}
