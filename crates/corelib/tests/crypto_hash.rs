use proptest::prelude::*;
use tiny_keccak::{Hasher, Keccak};
use xmrhash_corelib::crypto::sponge::{keccak256_labeled, Keccak256, Sponge};
use xmrhash_corelib::{keccak, keccak256, keccak_into, STATE_BYTES};

const VALID_LENGTHS: [usize; 10] = [32, 40, 48, 56, 64, 72, 80, 88, 96, STATE_BYTES];

#[test]
fn keccak256_empty_matches_vector() {
    let got = keccak256(b"");
    let exp =
        hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470").unwrap();
    assert_eq!(got, exp.as_slice());
}

#[test]
fn keccak256_abc_matches_vector() {
    let got = keccak(b"abc", 32);
    assert_eq!(
        hex::encode(got),
        "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
    );
}

#[test]
fn labeled_hash_is_prefix_concatenation() {
    let mut h = Keccak256::new();
    h.update(b"LBL");
    h.update(b"data");
    assert_eq!(h.finalize(), keccak256_labeled("LBL", b"data"));
}

#[test]
fn keccak_into_fills_buffer() {
    let mut out = [0u8; 64];
    keccak_into(b"buffer", &mut out);
    assert_eq!(out.as_slice(), keccak(b"buffer", 64).as_slice());
}

#[test]
fn sponge_reports_rate() {
    assert_eq!(Sponge::new(32).rate(), 136);
    assert_eq!(Sponge::new(64).rate(), 72);
    assert_eq!(Sponge::new(STATE_BYTES).rate(), 136);
    assert!(Sponge::try_new(16).is_err());
}

proptest! {
    #[test]
    fn output_length_is_exact(
        input in proptest::collection::vec(any::<u8>(), 0..600),
        idx in 0usize..VALID_LENGTHS.len(),
    ) {
        let len = VALID_LENGTHS[idx];
        prop_assert_eq!(keccak(&input, len).len(), len);
    }

    #[test]
    fn deterministic(input in proptest::collection::vec(any::<u8>(), 0..600)) {
        prop_assert_eq!(keccak(&input, 32), keccak(&input, 32));
    }

    #[test]
    fn matches_tiny_keccak(input in proptest::collection::vec(any::<u8>(), 0..600)) {
        let mut k = Keccak::v256();
        k.update(&input);
        let mut exp = [0u8; 32];
        k.finalize(&mut exp);
        prop_assert_eq!(keccak256(&input), exp);
    }

    #[test]
    fn split_updates_match(
        input in proptest::collection::vec(any::<u8>(), 0..600),
        cut in 0usize..600,
    ) {
        let cut = cut.min(input.len());
        let mut s = Sponge::new(48);
        s.update(&input[..cut]);
        s.update(&input[cut..]);
        prop_assert_eq!(s.finalize(), keccak(&input, 48));
    }
}
