//! Stable error codes shared by every adgate error type.

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
pub const ENTITLEMENT_TRANSPORT: &str = "ENTITLEMENT_TRANSPORT";
pub const ENTITLEMENT_HTTP: &str = "ENTITLEMENT_HTTP";
pub const ENTITLEMENT_UNAUTHORIZED: &str = "ENTITLEMENT_UNAUTHORIZED";
pub const ENTITLEMENT_MALFORMED: &str = "ENTITLEMENT_MALFORMED";
pub const PUBLISH_FAILED: &str = "PUBLISH_FAILED";
pub const BUS_FULL: &str = "BUS_FULL";
pub const CONFIG_READ: &str = "CONFIG_READ";
pub const CONFIG_PARSE: &str = "CONFIG_PARSE";
pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

/// Implemented by every error type so callers can map failures to a
/// string code without matching on variants.
pub trait AdGateErrorCode {
    fn error_code(&self) -> &'static str;
}
