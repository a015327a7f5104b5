use std::ffi::CString;

use serde::Serialize;

use crate::error::ErrorCode;

/// JSON reply handed across the ABI: `{"ok", "code", "msg", ...body}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    ok: bool,
    code: i32,
    msg: String,
    #[serde(flatten)]
    body: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(body: T) -> Self {
        Self {
            ok: true,
            code: ErrorCode::Ok.code(),
            msg: ErrorCode::Ok.message().to_string(),
            body,
        }
    }

    pub fn err(code: ErrorCode, msg: impl Into<String>, body: T) -> Self {
        Self {
            ok: false,
            code: code.code(),
            msg: msg.into(),
            body,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// `None` when serialization fails or the JSON contains a NUL byte.
    pub fn to_cstring(&self) -> Option<CString> {
        self.to_json().ok().and_then(|s| CString::new(s).ok())
    }
}

/// Body of the version reply.
#[derive(Debug, Serialize)]
pub struct VersionBody {
    pub version: &'static str,
    pub keccak_rounds: usize,
    pub profiles: Vec<xmrhash_corelib::profile::DigestProfile>,
}

impl VersionBody {
    pub fn current() -> Self {
        Self {
            version: xmrhash_corelib::version(),
            keccak_rounds: xmrhash_corelib::KECCAK_ROUNDS,
            profiles: xmrhash_corelib::profile::builtin_profiles(),
        }
    }
}
