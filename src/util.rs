use byteorder::{ByteOrder, LittleEndian};
use siphasher::sip::SipHasher;
use std::hash::{Hash, Hasher};

// Fixed keys so that the same item produces the same digest in every process.
const ITEM_HASHER_KEYS: (u64, u64) = (0, 0);

/// Hashes `item` with a fixed-key SipHash-2-4 and returns the little-endian bytes of the result.
pub fn item_digest<U>(item: &U) -> [u8; 8]
where
    U: Hash + ?Sized,
{
    let mut hasher = SipHasher::new_with_keys(ITEM_HASHER_KEYS.0, ITEM_HASHER_KEYS.1);
    item.hash(&mut hasher);
    let mut digest = [0; 8];
    LittleEndian::write_u64(&mut digest, hasher.finish());
    digest
}

/// Reads the leading 32-bit word of a digest, or `None` if the digest is shorter than 4 bytes.
pub fn leading_word(digest: &[u8]) -> Option<u32> {
    if digest.len() < 4 {
        return None;
    }
    Some(LittleEndian::read_u32(&digest[..4]))
}

#[cfg(test)]
pub mod tests {
    use super::{item_digest, leading_word};

    #[test]
    fn test_item_digest_stable() {
        assert_eq!(item_digest("foo"), item_digest("foo"));
        assert_eq!(item_digest(&42u32), item_digest(&42u32));
        assert_ne!(item_digest("foo"), item_digest("bar"));
    }

    #[test]
    fn test_leading_word() {
        assert_eq!(leading_word(&[0x01, 0x02, 0x03]), None);
        assert_eq!(leading_word(&[0x01, 0x00, 0x00, 0x00]), Some(1));
        assert_eq!(
            leading_word(&[0x78, 0x56, 0x34, 0x12, 0xFF, 0xFF]),
            Some(0x1234_5678),
        );
    }
}
