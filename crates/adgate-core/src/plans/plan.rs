//! Plan identifiers and their ad-display policy.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Legacy configs used `9999` as "practically infinite". Anything at or
/// above it is read back as [`SessionCap::Unlimited`].
pub const LEGACY_UNLIMITED_THRESHOLD: u64 = 9999;

/// Every subscription plan the backend can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanName {
    Free,
    Basic,
    Premium,
    Business,
}

impl PlanName {
    pub const ALL: [PlanName; 4] = [Self::Free, Self::Basic, Self::Premium, Self::Business];

    /// Plan name as string (backend payloads, config keys, logging).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Business => "business",
        }
    }

    /// Parse a plan name. Surrounding whitespace and ASCII case are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|plan| plan.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for PlanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many impressions a session may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionCap {
    Limited(u32),
    Unlimited,
}

impl SessionCap {
    /// True if `shown` impressions already exhaust this cap.
    pub fn is_reached(&self, shown: u32) -> bool {
        match self {
            Self::Limited(max) => shown >= *max,
            Self::Unlimited => false,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Limited(0))
    }
}

impl fmt::Display for SessionCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(max) => write!(f, "{max}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

impl Serialize for SessionCap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Limited(max) => serializer.serialize_u32(*max),
            Self::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for SessionCap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(i64),
            Word(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Count(n) if n < 0 => Err(de::Error::custom(format!(
                "max_per_session must be non-negative, got {n}"
            ))),
            Repr::Count(n) if n as u64 >= LEGACY_UNLIMITED_THRESHOLD => Ok(Self::Unlimited),
            // Below the threshold, so it fits in u32.
            Repr::Count(n) => Ok(Self::Limited(n as u32)),
            Repr::Word(w) if w.trim().eq_ignore_ascii_case("unlimited") => Ok(Self::Unlimited),
            Repr::Word(w) => Err(de::Error::custom(format!(
                "max_per_session must be an integer or \"unlimited\", got {w:?}"
            ))),
        }
    }
}

/// Ad-display policy attached to a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPolicy {
    pub max_per_session: SessionCap,
    pub min_interval_sec: u64,
}

impl PlanPolicy {
    /// Most restrictive policy. Used for unknown plans.
    pub const DENY_ALL: PlanPolicy = PlanPolicy {
        max_per_session: SessionCap::Limited(0),
        min_interval_sec: 0,
    };

    pub const fn limited(max_per_session: u32, min_interval_sec: u64) -> Self {
        Self {
            max_per_session: SessionCap::Limited(max_per_session),
            min_interval_sec,
        }
    }

    pub const fn unlimited(min_interval_sec: u64) -> Self {
        Self {
            max_per_session: SessionCap::Unlimited,
            min_interval_sec,
        }
    }

    /// A zero cap exempts the session from ads entirely.
    pub fn exempts_session(&self) -> bool {
        self.max_per_session.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Wrapper {
        cap: SessionCap,
    }

    #[test]
    fn plan_names_parse_case_insensitively() {
        assert_eq!(PlanName::parse("Premium"), Some(PlanName::Premium));
        assert_eq!(PlanName::parse(" free "), Some(PlanName::Free));
        assert_eq!(PlanName::parse("platinum"), None);
        assert_eq!(PlanName::parse(""), None);
    }

    #[test]
    fn unlimited_cap_is_never_reached() {
        assert!(!SessionCap::Unlimited.is_reached(u32::MAX));
        assert!(SessionCap::Limited(2).is_reached(2));
        assert!(!SessionCap::Limited(2).is_reached(1));
    }

    #[test]
    fn cap_accepts_word_and_integer() {
        let w: Wrapper = toml::from_str("cap = \"unlimited\"").unwrap();
        assert_eq!(w.cap, SessionCap::Unlimited);
        let w: Wrapper = toml::from_str("cap = 4").unwrap();
        assert_eq!(w.cap, SessionCap::Limited(4));
    }

    #[test]
    fn legacy_magic_number_means_unlimited() {
        let w: Wrapper = serde_json::from_str(r#"{"cap": 9999}"#).unwrap();
        assert_eq!(w.cap, SessionCap::Unlimited);
        let w: Wrapper = serde_json::from_str(r#"{"cap": 9998}"#).unwrap();
        assert_eq!(w.cap, SessionCap::Limited(9998));
    }

    #[test]
    fn cap_rejects_negative_and_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"cap": -1}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"cap": "lots"}"#).is_err());
    }

    #[test]
    fn unlimited_serializes_as_word() {
        let json = serde_json::to_string(&Wrapper {
            cap: SessionCap::Unlimited,
        })
        .unwrap();
        assert_eq!(json, r#"{"cap":"unlimited"}"#);
    }
}
