//! C ABI over the Keccak sponge and the ed25519 hash derivations.
//!
//! Size misuse (bad output lengths, too many rounds) aborts exactly like the
//! Rust API does. A panic reaching an `extern "C"` boundary aborts the
//! process (Rust 1.81 and later), so nothing unwinds into C. Only
//! problems the ABI itself can see, such as null pointers, come back as
//! status codes.

mod error;
mod ffi_json;

use std::ffi::{c_char, CStr, CString};

use curve25519_dalek::edwards::CompressedEdwardsY;
use xmrhash_corelib as core;

pub use error::{ErrorCode, XMR_ERR_INTERNAL, XMR_ERR_INVALID_ARG, XMR_ERR_INVALID_POINT, XMR_OK};
pub use ffi_json::{Envelope, VersionBody};

unsafe fn input_slice<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    if len == 0 {
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts(ptr, len))
}

unsafe fn write_cstring(out: *mut *mut c_char, s: CString) {
    *out = s.into_raw();
}

/// Keccak digest of `inlen` bytes at `input` into `mdlen` bytes at `md`.
///
/// # Safety
/// `input` must be readable for `inlen` bytes (it may be null when `inlen`
/// is 0) and `md` writable for `mdlen` bytes.
#[no_mangle]
pub unsafe extern "C" fn xmr_keccak(input: *const u8, inlen: usize, md: *mut u8, mdlen: i32) -> i32 {
    // Negative lengths take the zero-length abort inside the sponge.
    let mdlen = usize::try_from(mdlen).unwrap_or(0);
    let Some(data) = input_slice(input, inlen) else {
        return XMR_ERR_INVALID_ARG;
    };
    if md.is_null() {
        return XMR_ERR_INVALID_ARG;
    }
    let mut sponge = core::Sponge::new(mdlen);
    sponge.update(data);
    sponge.finalize_into(std::slice::from_raw_parts_mut(md, mdlen));
    XMR_OK
}

/// Keccak-f[1600] over 25 lanes at `st`.
///
/// # Safety
/// `st` must point to 25 writable, aligned `u64` values.
#[no_mangle]
pub unsafe extern "C" fn xmr_keccakf(st: *mut u64, rounds: i32) -> i32 {
    if st.is_null() {
        return XMR_ERR_INVALID_ARG;
    }
    let rounds = usize::try_from(rounds).unwrap_or(usize::MAX);
    let state = &mut *(st as *mut core::State);
    core::keccakf(state, rounds);
    XMR_OK
}

/// Keccak-256 of the input reduced mod l, 32 bytes written to `md`.
///
/// # Safety
/// `input` readable for `inlen` bytes, `md` writable for 32 bytes.
#[no_mangle]
pub unsafe extern "C" fn xmr_hash_to_scalar(input: *const u8, inlen: usize, md: *mut u8) -> i32 {
    let Some(data) = input_slice(input, inlen) else {
        return XMR_ERR_INVALID_ARG;
    };
    if md.is_null() {
        return XMR_ERR_INVALID_ARG;
    }
    let scalar = core::hash_to_scalar_bytes(data);
    std::ptr::copy_nonoverlapping(scalar.as_ptr(), md, scalar.len());
    XMR_OK
}

/// Map the 32 bytes at `input` to a prime-order point and write its
/// compressed encoding to `out`. `inlen` is the length parameter the sponge
/// validates; it does not change the result.
///
/// # Safety
/// `input` readable for 32 bytes, `out` writable for 32 bytes.
#[no_mangle]
pub unsafe extern "C" fn xmr_hash_to_point(input: *const u8, inlen: usize, out: *mut u8) -> i32 {
    if input.is_null() || out.is_null() {
        return XMR_ERR_INVALID_ARG;
    }
    let bytes = &*(input as *const [u8; 32]);
    let point = core::hash_to_point(bytes, inlen);
    std::ptr::copy_nonoverlapping(point.compress().as_bytes().as_ptr(), out, 32);
    XMR_OK
}

/// Key-image base point of the compressed public key at `pk`.
///
/// # Safety
/// `pk` readable for 32 bytes, `out` writable for 32 bytes.
#[no_mangle]
pub unsafe extern "C" fn xmr_hash_point_to_point(pk: *const u8, out: *mut u8) -> i32 {
    if pk.is_null() || out.is_null() {
        return XMR_ERR_INVALID_ARG;
    }
    let Some(point) = CompressedEdwardsY(*(pk as *const [u8; 32])).decompress() else {
        return XMR_ERR_INVALID_POINT;
    };
    let base = core::hash_point_to_point(&point);
    std::ptr::copy_nonoverlapping(base.compress().as_bytes().as_ptr(), out, 32);
    XMR_OK
}

/// Version and built-in profiles as a JSON envelope. Release with
/// [`xmr_free`].
///
/// # Safety
/// `out_json` must be a valid pointer to write a `char *` into.
#[no_mangle]
pub unsafe extern "C" fn xmr_version(out_json: *mut *mut c_char) -> i32 {
    if out_json.is_null() {
        return XMR_ERR_INVALID_ARG;
    }
    match Envelope::ok(VersionBody::current()).to_cstring() {
        Some(s) => {
            write_cstring(out_json, s);
            XMR_OK
        }
        None => XMR_ERR_INTERNAL,
    }
}

#[derive(serde::Serialize)]
struct ProfileBody {
    profile: Option<core::profile::DigestProfile>,
    rate: Option<usize>,
}

/// Look up a digest profile by id. Unknown ids produce an error envelope
/// and `XMR_ERR_INVALID_ARG`.
///
/// # Safety
/// `id` must be a NUL-terminated string; `out_json` as for [`xmr_version`].
#[no_mangle]
pub unsafe extern "C" fn xmr_profile_info(id: *const c_char, out_json: *mut *mut c_char) -> i32 {
    if id.is_null() || out_json.is_null() {
        return XMR_ERR_INVALID_ARG;
    }
    let id = CStr::from_ptr(id).to_string_lossy();
    let profiles = core::list_profiles();
    let found = core::profile::find_profile(&profiles, &id).cloned();
    let (status, envelope) = match found {
        Some(p) => {
            let rate = p.rate().ok();
            (
                XMR_OK,
                Envelope::ok(ProfileBody {
                    profile: Some(p),
                    rate,
                }),
            )
        }
        None => (
            XMR_ERR_INVALID_ARG,
            Envelope::err(
                ErrorCode::InvalidArg,
                format!("profile '{id}' not found"),
                ProfileBody {
                    profile: None,
                    rate: None,
                },
            ),
        ),
    };
    match envelope.to_cstring() {
        Some(s) => {
            write_cstring(out_json, s);
            status
        }
        None => XMR_ERR_INTERNAL,
    }
}

/// Release a string returned by this library.
///
/// # Safety
/// `ptr` must come from [`xmr_version`] or [`xmr_profile_info`] and not
/// have been freed already.
#[no_mangle]
pub unsafe extern "C" fn xmr_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
