//! Digest comparison for signature candidates.

use subtle::ConstantTimeEq;

/// Compare an expected signature digest with a candidate from the header.
///
/// Equal-length inputs take the same time wherever they differ. A length
/// mismatch returns early; every `v1` digest is 44 base64 characters, so this
/// reveals nothing about the key.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_slices() {
        assert!(constant_time_compare(b"g0hM9SsE", b"g0hM9SsE"));
    }

    #[test]
    fn test_first_byte_differs() {
        assert!(!constant_time_compare(b"g0hM9SsE", b"h0hM9SsE"));
    }

    #[test]
    fn test_any_flipped_digest_byte_is_rejected() {
        let digest = b"g0hM9SsE+OTPJTGt/tmIKtSyZlE3uFJELVlNIOLJ1OE=";
        for i in 0..digest.len() {
            let mut candidate = *digest;
            candidate[i] ^= 0x01;
            assert!(!constant_time_compare(digest, &candidate), "byte {i}");
        }
    }

    #[test]
    fn test_last_byte_differs() {
        assert!(!constant_time_compare(b"g0hM9SsE", b"g0hM9SsF"));
    }

    #[test]
    fn test_different_lengths() {
        assert!(!constant_time_compare(b"g0hM9SsE=", b"g0hM9SsE"));
    }

    #[test]
    fn test_empty_slices() {
        assert!(constant_time_compare(b"", b""));
    }
}
