//! Hash-to-point on ed25519.
//!
//! `map_to_curve` is the vartime field-element map used by the surrounding
//! protocol for key images: it interprets 32 bytes as a field element and
//! lands on the curve (not necessarily in the prime-order subgroup).
//! Multiplying by the cofactor 8 then yields a subgroup point.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};

use crate::crypto::field::{divpowm1, Fe, FFFB1, FFFB2, FFFB3, FFFB4, MA, MA2, SQRT_M1};
use crate::crypto::sponge::{keccak256, rate_for};
use crate::errors::{abort_misuse, curve_map_failure, CurveError};

/// Projective (X : Y : Z) output of the map, before conversion.
struct ProjectivePoint {
    x: Fe,
    y: Fe,
    z: Fe,
}

impl ProjectivePoint {
    fn to_edwards(&self) -> Result<EdwardsPoint, CurveError> {
        let z_inv = self.z.invert();
        let x = &self.x * &z_inv;
        let y = &self.y * &z_inv;
        let mut encoded = y.to_bytes();
        if x.is_negative() {
            encoded[31] |= 0x80;
        }
        CompressedEdwardsY(encoded)
            .decompress()
            .ok_or(CurveError::NotOnCurve)
    }
}

fn map_projective(bytes: &[u8; 32]) -> ProjectivePoint {
    let u = Fe::from_bytes(bytes);
    let v = &Fe::from_u64(2) * &u.square(); // 2u^2
    let w = &v + &Fe::one(); // 2u^2 + 1
    let mut x = &w.square() + &(&*MA2 * &v); // w^2 - 2A^2u^2
    let mut rx = divpowm1(&w, &x); // (w / x)^((p + 3) / 8)
    x = &rx.square() * &x;

    let mut z = MA.clone();
    let negative = if (&w - &x).is_zero() {
        rx = &rx * &*FFFB2;
        false
    } else if (&w + &x).is_zero() {
        rx = &rx * &*FFFB1;
        false
    } else {
        true
    };

    let sign = if negative {
        x = &x * &*SQRT_M1;
        if (&w - &x).is_zero() {
            rx = &rx * &*FFFB4;
        } else {
            debug_assert!((&w + &x).is_zero());
            rx = &rx * &*FFFB3;
        }
        // z stays -A
        true
    } else {
        rx = &rx * &u; // u * sqrt(2A(A + 2) w / x)
        z = &z * &v; // -2Au^2
        false
    };

    if rx.is_negative() != sign {
        debug_assert!(!rx.is_zero());
        rx = -&rx;
    }

    let pz = &z + &w;
    let py = &z - &w;
    ProjectivePoint {
        x: &rx * &pz,
        y: py,
        z: pz,
    }
}

/// Map 32 bytes to a curve point without clearing the cofactor.
pub fn try_map_to_curve(bytes: &[u8; 32]) -> Result<EdwardsPoint, CurveError> {
    map_projective(bytes).to_edwards()
}

/// Map 32 bytes to a curve point without clearing the cofactor.
///
/// The map always lands on the curve; a decoding failure means the field
/// arithmetic is broken and panics with a curve diagnostic.
pub fn map_to_curve(bytes: &[u8; 32]) -> EdwardsPoint {
    try_map_to_curve(bytes).unwrap_or_else(|err| curve_map_failure(err))
}

/// Hash a 32-byte key to a point in the prime-order subgroup:
/// `8 * map_to_curve(input)`.
///
/// `length_param` is the caller's digest length. No digest of `input` feeds
/// the map, so only the sponge's length validation applies: lengths the
/// sponge rejects abort and every accepted length yields the same point.
pub fn hash_to_point(input: &[u8; 32], length_param: usize) -> EdwardsPoint {
    if let Err(err) = rate_for(length_param) {
        abort_misuse(err);
    }
    map_to_curve(input).mul_by_cofactor()
}

/// [`hash_to_point`] over a slice that must be exactly 32 bytes long.
pub fn hash_to_point_slice(input: &[u8]) -> Result<EdwardsPoint, CurveError> {
    let bytes: &[u8; 32] = input.try_into().map_err(|_| CurveError::InvalidLength {
        expected: 32,
        got: input.len(),
    })?;
    Ok(hash_to_point(bytes, bytes.len()))
}

/// Key-image base point of a public key: `8 * map(keccak256(compress(P)))`.
pub fn hash_point_to_point(point: &EdwardsPoint) -> EdwardsPoint {
    let digest = keccak256(point.compress().as_bytes());
    map_to_curve(&digest).mul_by_cofactor()
}
