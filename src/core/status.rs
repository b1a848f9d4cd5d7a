//! Error codes returned in the `code` attribute of `<error>` elements.
//!
//! The crate never interprets these; they are exported so callers can branch on
//! [`FmError::service_code`](crate::FmError::service_code).

pub const STATUS_INVALID_SERVICE: u32 = 2;
pub const STATUS_INVALID_METHOD: u32 = 3;
pub const STATUS_AUTH_FAILED: u32 = 4;
pub const STATUS_INVALID_FORMAT: u32 = 5;
pub const STATUS_INVALID_PARAMS: u32 = 6;
pub const STATUS_INVALID_RESOURCE: u32 = 7;
/// Older servers call code 8 a token error, newer ones "operation failed". Accept either.
pub const STATUS_TOKEN_ERROR: u32 = 8;
pub const STATUS_OPERATION_FAILED: u32 = 8;
pub const STATUS_INVALID_SK: u32 = 9;
pub const STATUS_INVALID_API_KEY: u32 = 10;
pub const STATUS_OFFLINE: u32 = 11;
pub const STATUS_SUBSCRIBERS_ONLY: u32 = 12;
pub const STATUS_INVALID_SIGNATURE: u32 = 13;
pub const STATUS_TOKEN_UNAUTHORIZED: u32 = 14;
pub const STATUS_TOKEN_EXPIRED: u32 = 15;
pub const STATUS_TEMPORARILY_UNAVAILABLE: u32 = 16;
pub const STATUS_LOGIN_REQUIRED: u32 = 17;
pub const STATUS_TRIAL_EXPIRED: u32 = 18;
pub const STATUS_NOT_ENOUGH_CONTENT: u32 = 20;
pub const STATUS_NOT_ENOUGH_MEMBERS: u32 = 21;
pub const STATUS_NOT_ENOUGH_FANS: u32 = 22;
pub const STATUS_NOT_ENOUGH_NEIGHBOURS: u32 = 23;
pub const STATUS_NO_PEAK_RADIO: u32 = 24;
pub const STATUS_RADIO_NOT_FOUND: u32 = 25;
pub const STATUS_API_KEY_SUSPENDED: u32 = 26;
pub const STATUS_DEPRECATED: u32 = 27;
pub const STATUS_RATE_LIMIT_EXCEEDED: u32 = 29;
