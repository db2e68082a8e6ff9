//! Storage key namespace owned by the session ad-state store.

/// Holds the current ad-session id.
pub const SESSION_KEY: &str = "ad.session";
/// `ad.count.<session>`: impressions shown this session.
pub const COUNT_KEY_PREFIX: &str = "ad.count.";
/// `ad.last.<session>`: unix seconds of the last impression.
pub const LAST_KEY_PREFIX: &str = "ad.last.";

/// Topic published after every recorded impression.
pub const IMPRESSION_TOPIC: &str = "ads.impression";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "ADGATE_LOG";
