//! Hash-to-scalar: Keccak-256 reduced modulo the ed25519 group order.

use curve25519_dalek::scalar::Scalar;

use crate::crypto::sponge::{keccak256, Keccak256};

/// `keccak256(input) mod l`.
pub fn hash_to_scalar(input: &[u8]) -> Scalar {
    Scalar::from_bytes_mod_order(keccak256(input))
}

/// Hash the concatenation of `parts` to a scalar.
pub fn hash_to_scalar_parts(parts: &[&[u8]]) -> Scalar {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    Scalar::from_bytes_mod_order(hasher.finalize())
}

/// Canonical little-endian encoding of [`hash_to_scalar`].
pub fn hash_to_scalar_bytes(input: &[u8]) -> [u8; 32] {
    hash_to_scalar(input).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_equal_concatenation() {
        let joined = hash_to_scalar(b"ring-prefix|msg");
        let parts = hash_to_scalar_parts(&[b"ring-".as_slice(), b"prefix|", b"msg"]);
        assert_eq!(joined, parts);
    }

    #[test]
    fn output_is_canonical() {
        for i in 0..64u8 {
            let bytes = hash_to_scalar_bytes(&[i; 40]);
            let canonical = Scalar::from_canonical_bytes(bytes);
            assert!(bool::from(canonical.is_some()));
        }
    }

    #[test]
    fn reduces_digests_above_order() {
        // keccak256("abc") ends in 0x45, far above l.
        let digest = keccak256(b"abc");
        assert_eq!(digest[31], 0x45);
        assert_ne!(hash_to_scalar(b"abc").to_bytes(), digest);
    }

    #[test]
    fn keeps_digests_below_order() {
        for i in 0..=255u8 {
            let digest = keccak256(&[i]);
            if digest[31] < 0x10 {
                assert_eq!(hash_to_scalar(&[i]).to_bytes(), digest);
                return;
            }
        }
        panic!("no digest below 2^252 among 256 samples");
    }
}
