//! Arithmetic in GF(2^255 - 19) for the vartime field-to-curve map.
//! Values are kept fully reduced; nothing here is constant-time.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use std::ops::{Add, Mul, Neg, Sub};

/// p = 2^255 - 19
pub fn p25519_modulus() -> BigUint {
    (BigUint::one() << 255u32) - BigUint::from(19u32)
}

static P: Lazy<BigUint> = Lazy::new(p25519_modulus);

/// (p - 5) / 8, the exponent behind [`divpowm1`].
static EXP_DIVPOWM1: Lazy<BigUint> = Lazy::new(|| (&*P - BigUint::from(5u32)) >> 3u32);

/// (p + 3) / 8, candidate square-root exponent for p = 5 mod 8.
static EXP_SQRT: Lazy<BigUint> = Lazy::new(|| (&*P + BigUint::from(3u32)) >> 3u32);

/// Montgomery coefficient of curve25519.
pub const MONTGOMERY_A: u32 = 486_662;

#[derive(Clone, PartialEq, Eq)]
pub struct Fe(BigUint);

impl std::fmt::Debug for Fe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fe({:x})", self.0)
    }
}

impl Fe {
    pub fn zero() -> Self {
        Fe(BigUint::zero())
    }

    pub fn one() -> Self {
        Fe(BigUint::one())
    }

    pub fn from_u64(v: u64) -> Self {
        Fe(BigUint::from(v) % &*P)
    }

    /// Little-endian decode that ignores bit 255 and reduces mod p.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut b = *bytes;
        b[31] &= 0x7f;
        Fe(BigUint::from_bytes_le(&b) % &*P)
    }

    /// Canonical 32-byte little-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        let le = self.0.to_bytes_le();
        out[..le.len()].copy_from_slice(&le);
        out
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Low bit of the canonical encoding.
    pub fn is_negative(&self) -> bool {
        self.to_bytes()[0] & 1 == 1
    }

    pub fn square(&self) -> Self {
        self * self
    }

    pub fn pow(&self, exp: &BigUint) -> Self {
        Fe(self.0.modpow(exp, &*P))
    }

    /// Multiplicative inverse; zero maps to zero.
    pub fn invert(&self) -> Self {
        self.pow(&(&*P - BigUint::from(2u32)))
    }

    /// Square root for p = 5 mod 8, if one exists.
    pub fn sqrt(&self) -> Option<Self> {
        let r = self.pow(&EXP_SQRT);
        if &r.square() == self {
            return Some(r);
        }
        let r = &r * &*SQRT_M1;
        if &r.square() == self {
            return Some(r);
        }
        None
    }
}

impl Add for &Fe {
    type Output = Fe;
    fn add(self, rhs: &Fe) -> Fe {
        Fe((&self.0 + &rhs.0) % &*P)
    }
}

impl Sub for &Fe {
    type Output = Fe;
    fn sub(self, rhs: &Fe) -> Fe {
        Fe((&self.0 + &*P - &rhs.0) % &*P)
    }
}

impl Mul for &Fe {
    type Output = Fe;
    fn mul(self, rhs: &Fe) -> Fe {
        Fe((&self.0 * &rhs.0) % &*P)
    }
}

impl Neg for &Fe {
    type Output = Fe;
    fn neg(self) -> Fe {
        &Fe::zero() - self
    }
}

/// u * v^3 * (u * v^7)^((p - 5) / 8), i.e. (u / v)^((p + 3) / 8).
pub fn divpowm1(u: &Fe, v: &Fe) -> Fe {
    let v3 = &v.square() * v;
    let uv7 = &(&v3.square() * v) * u;
    &(&uv7.pow(&EXP_DIVPOWM1) * &v3) * u
}

/// sqrt(-1) = 2^((p - 1) / 4)
pub static SQRT_M1: Lazy<Fe> = Lazy::new(|| {
    let exp = (&*P - BigUint::one()) >> 2u32;
    Fe::from_u64(2).pow(&exp)
});

/// -A
pub static MA: Lazy<Fe> = Lazy::new(|| -&Fe::from_u64(MONTGOMERY_A.into()));

/// -A^2
pub static MA2: Lazy<Fe> = Lazy::new(|| -&Fe::from_u64(MONTGOMERY_A.into()).square());

/// A * (A + 2)
fn a_times_a_plus_2() -> Fe {
    let a = u64::from(MONTGOMERY_A);
    Fe::from_u64(a * (a + 2))
}

fn residue_root(value: Fe) -> Fe {
    value
        .sqrt()
        .expect("map constant must be a quadratic residue mod p")
}

/// sqrt(-2 * A * (A + 2))
pub static FFFB1: Lazy<Fe> =
    Lazy::new(|| residue_root(-&(&Fe::from_u64(2) * &a_times_a_plus_2())));

/// sqrt(2 * A * (A + 2))
pub static FFFB2: Lazy<Fe> = Lazy::new(|| residue_root(&Fe::from_u64(2) * &a_times_a_plus_2()));

/// sqrt(-sqrt(-1) * A * (A + 2))
pub static FFFB3: Lazy<Fe> = Lazy::new(|| residue_root(-&(&*SQRT_M1 * &a_times_a_plus_2())));

/// sqrt(sqrt(-1) * A * (A + 2))
pub static FFFB4: Lazy<Fe> = Lazy::new(|| residue_root(&*SQRT_M1 * &a_times_a_plus_2()));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulus_shape() {
        let p = p25519_modulus();
        assert_eq!(p.bits(), 255);
        assert_eq!(&p % BigUint::from(8u32), BigUint::from(5u32));
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        assert_eq!(SQRT_M1.square(), -&Fe::one());
    }

    #[test]
    fn from_bytes_drops_top_bit_and_reduces() {
        let mut bytes = [0xffu8; 32];
        // bit 255 cleared: 2^255 - 1 = p + 18
        let fe = Fe::from_bytes(&bytes);
        assert_eq!(fe, Fe::from_u64(18));
        bytes[31] = 0x00;
        bytes[0] = 0x05;
        bytes[1..31].fill(0);
        assert_eq!(Fe::from_bytes(&bytes), Fe::from_u64(5));
    }

    #[test]
    fn arithmetic_identities() {
        let a = Fe::from_u64(123_456_789);
        let b = Fe::from_u64(987_654_321);
        assert_eq!(&(&a + &b) - &b, a);
        assert_eq!(&a * &a.invert(), Fe::one());
        assert_eq!(&a + &(-&a), Fe::zero());
        assert!(Fe::zero().invert().is_zero());
    }

    #[test]
    fn divpowm1_matches_root_of_ratio() {
        let u = Fe::from_u64(9);
        let v = Fe::from_u64(4);
        let r = divpowm1(&u, &v);
        let ratio = &u * &v.invert();
        let r2 = r.square();
        assert!(r2 == ratio || r2 == -&ratio);
    }

    #[test]
    fn map_constants_are_roots() {
        let k = a_times_a_plus_2();
        let two = Fe::from_u64(2);
        assert_eq!(FFFB1.square(), -&(&two * &k));
        assert_eq!(FFFB2.square(), &two * &k);
        assert_eq!(FFFB3.square(), -&(&*SQRT_M1 * &k));
        assert_eq!(FFFB4.square(), &*SQRT_M1 * &k);
        assert_eq!(&*MA2, &-&MA.square());
    }

    #[test]
    fn encoding_is_canonical() {
        let fe = Fe::from_u64(0x0102);
        let bytes = fe.to_bytes();
        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes[1], 0x01);
        assert_eq!(Fe::from_bytes(&bytes), fe);
    }
}
