use xmrhash_corelib::crypto::keccak::{ROUND_CONSTANTS, ROTATION_OFFSETS};
use xmrhash_corelib::{keccakf, State, KECCAK_ROUNDS, STATE_WORDS};

#[test]
fn permute_is_pure() {
    let input: State = core::array::from_fn(|i| 0x0123_4567_89ab_cdef_u64.rotate_left(i as u32));
    let mut a = input;
    let mut b = input;
    keccakf(&mut a, KECCAK_ROUNDS);
    keccakf(&mut b, KECCAK_ROUNDS);
    assert_eq!(a, b);
}

#[test]
fn reduced_rounds_differ() {
    let mut full = [0u64; STATE_WORDS];
    let mut half = [0u64; STATE_WORDS];
    keccakf(&mut full, KECCAK_ROUNDS);
    keccakf(&mut half, 12);
    assert_ne!(full, half);
}

#[test]
fn one_round_on_zero_state_is_iota_only() {
    // Theta, Rho, Pi and Chi all map zero to zero.
    let mut st = [0u64; STATE_WORDS];
    keccakf(&mut st, 1);
    assert_eq!(st[0], ROUND_CONSTANTS[0]);
    assert!(st[1..].iter().all(|&w| w == 0));
}

#[test]
fn rotation_offsets_are_below_word_size() {
    assert!(ROTATION_OFFSETS.iter().all(|&r| r < 64));
}
