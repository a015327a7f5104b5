use thiserror::Error;

/// Reasons a sponge configuration is rejected. Surfacing one of these from
/// the hashing entry points is caller misuse and aborts.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SpongeError {
    #[error("output length must be positive")]
    ZeroLength,
    #[error("output length {0} exceeds 100 bytes and is not the full 200-byte state")]
    Oversized(usize),
    #[error("output length {0} is not a multiple of 8 bytes")]
    Misaligned(usize),
    #[error("rate {rate} for output length {output_len} does not fit the 144-byte block buffer")]
    RateOutOfBounds { output_len: usize, rate: usize },
    #[error("final block of {remaining} bytes does not fit below rate {rate}")]
    PaddingOverflow { remaining: usize, rate: usize },
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CurveError {
    #[error("mapped coordinates do not decode to an ed25519 point")]
    NotOnCurve,
    #[error("expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// Report a contract violation and panic. Release builds run with
/// `panic = "abort"`, so this terminates the process.
#[cold]
#[track_caller]
pub(crate) fn abort_misuse(reason: impl std::fmt::Display) -> ! {
    tracing::error!(%reason, "Bad keccak use");
    panic!("Bad keccak use: {reason}");
}

/// The field-to-curve map left the curve. Only broken field arithmetic can
/// get here.
#[cold]
#[track_caller]
pub(crate) fn curve_map_failure(err: CurveError) -> ! {
    tracing::error!(%err, "curve map failure");
    panic!("curve map failure: {err}");
}
