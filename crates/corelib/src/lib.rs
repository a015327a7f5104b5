//! Core library: Keccak permutation and sponge, hash-to-scalar and
//! hash-to-point derivations, digest profiles for CLI/FFI.

pub mod config;
pub mod crypto;
pub mod errors;
pub mod profile;

pub use crypto::keccak::{keccakf, State, KECCAK_ROUNDS, STATE_BYTES, STATE_WORDS};
pub use crypto::point::{hash_point_to_point, hash_to_point, map_to_curve};
pub use crypto::scalar::{hash_to_scalar, hash_to_scalar_bytes, hash_to_scalar_parts};
pub use crypto::sponge::{keccak, keccak256, keccak_into, rate_for, Keccak256, Sponge};
pub use errors::{CurveError, SpongeError};

/// API: list digest profiles (built-ins plus any found on disk)
pub fn list_profiles() -> Vec<profile::DigestProfile> {
    profile::load_all_profiles_or_default()
}

/// Version helper for CLI
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
