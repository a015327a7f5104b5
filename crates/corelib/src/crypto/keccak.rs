//! Keccak-f[1600] permutation over a 25-lane state.

/// Number of rounds in the full Keccak-f[1600] schedule.
pub const KECCAK_ROUNDS: usize = 24;

/// Lanes in the permutation state.
pub const STATE_WORDS: usize = 25;

/// Size of the permutation state in bytes.
pub const STATE_BYTES: usize = STATE_WORDS * 8;

/// Permutation state: 25 little-endian 64-bit lanes.
pub type State = [u64; STATE_WORDS];

/// Iota round constants.
pub const ROUND_CONSTANTS: [u64; KECCAK_ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rho rotation amounts, in the order the fused Rho+Pi walk visits lanes.
pub const ROTATION_OFFSETS: [u32; KECCAK_ROUNDS] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Pi destination lanes for the fused Rho+Pi walk starting at lane 1.
pub const PI_LANES: [usize; KECCAK_ROUNDS] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Apply `rounds` rounds of Keccak-f[1600] to `state` in place.
///
/// Round `i` uses `ROUND_CONSTANTS[i]`, so `rounds` may not exceed
/// [`KECCAK_ROUNDS`]; asking for more is a caller bug and panics.
pub fn keccakf(state: &mut State, rounds: usize) {
    assert!(
        rounds <= KECCAK_ROUNDS,
        "Bad keccak use: {rounds} rounds requested, at most {KECCAK_ROUNDS} defined"
    );

    let mut bc = [0u64; 5];
    for rc in ROUND_CONSTANTS.iter().take(rounds) {
        // Theta
        for (i, c) in bc.iter_mut().enumerate() {
            *c = state[i] ^ state[i + 5] ^ state[i + 10] ^ state[i + 15] ^ state[i + 20];
        }
        for i in 0..5 {
            let t = bc[(i + 4) % 5] ^ bc[(i + 1) % 5].rotate_left(1);
            for j in (0..STATE_WORDS).step_by(5) {
                state[j + i] ^= t;
            }
        }

        // Rho Pi
        let mut carry = state[1];
        for (&lane, &rot) in PI_LANES.iter().zip(ROTATION_OFFSETS.iter()) {
            let displaced = state[lane];
            state[lane] = carry.rotate_left(rot);
            carry = displaced;
        }

        // Chi
        for j in (0..STATE_WORDS).step_by(5) {
            bc.copy_from_slice(&state[j..j + 5]);
            for i in 0..5 {
                state[j + i] ^= !bc[(i + 1) % 5] & bc[(i + 2) % 5];
            }
        }

        // Iota
        state[0] ^= rc;
    }
}
