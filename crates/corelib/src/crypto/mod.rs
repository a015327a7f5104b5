//! Crypto primitives surface area.
//! Keccak-f[1600], the 0x01-padded Keccak sponge, and the two ed25519
//! derivations built on it (hash-to-scalar, hash-to-point).

pub mod field;
pub mod keccak;
pub mod point;
pub mod scalar;
pub mod sponge;
