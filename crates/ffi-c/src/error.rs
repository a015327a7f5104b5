#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    Ok = 0,
    InvalidArg = 1,
    InvalidPoint = 2,
    Internal = 3,
}

impl ErrorCode {
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::Ok => "OK",
            ErrorCode::InvalidArg => "null or malformed argument",
            ErrorCode::InvalidPoint => "bytes do not decode to an ed25519 point",
            ErrorCode::Internal => "internal error",
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

pub const XMR_OK: i32 = ErrorCode::Ok.code();
pub const XMR_ERR_INVALID_ARG: i32 = ErrorCode::InvalidArg.code();
pub const XMR_ERR_INVALID_POINT: i32 = ErrorCode::InvalidPoint.code();
pub const XMR_ERR_INTERNAL: i32 = ErrorCode::Internal.code();
