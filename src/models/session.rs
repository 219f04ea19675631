//! # models::session
//!
//! Market trading phase labels and the caller-facing session selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Session ──────────────────────────────────────────────────────────────────

/// Market trading phase a scan is evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Session {
    /// Pre-market.
    Pre,
    /// Regular trading hours.
    Reg,
    /// After-hours.
    Post,
}

impl Session {
    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Pre => "PRE",
            Session::Reg => "REG",
            Session::Post => "POST",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Session {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PRE" => Ok(Session::Pre),
            "REG" => Ok(Session::Reg),
            "POST" => Ok(Session::Post),
            _ => Err(()),
        }
    }
}

// ─── SessionChoice ────────────────────────────────────────────────────────────

/// What the caller asked for: an explicit session, or `AUTO` (resolve from
/// the wall clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionChoice {
    #[default]
    Auto,
    Fixed(Session),
}

impl SessionChoice {
    /// Parse a query/config value. Missing, `"AUTO"` and anything that is not
    /// a known session label all mean [`SessionChoice::Auto`].
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse::<Session>().ok())
            .map(SessionChoice::Fixed)
            .unwrap_or(SessionChoice::Auto)
    }
}

impl From<Session> for SessionChoice {
    fn from(session: Session) -> Self {
        SessionChoice::Fixed(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_explicit_labels() {
        assert_eq!(SessionChoice::parse(Some("PRE")), SessionChoice::Fixed(Session::Pre));
        assert_eq!(SessionChoice::parse(Some("reg")), SessionChoice::Fixed(Session::Reg));
        assert_eq!(SessionChoice::parse(Some(" POST ")), SessionChoice::Fixed(Session::Post));
    }

    #[test]
    fn test_parse_auto_and_unknown() {
        assert_eq!(SessionChoice::parse(None), SessionChoice::Auto);
        assert_eq!(SessionChoice::parse(Some("AUTO")), SessionChoice::Auto);
        assert_eq!(SessionChoice::parse(Some("lunch")), SessionChoice::Auto);
    }

    #[test]
    fn test_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Session::Post).unwrap(), r#""POST""#);
    }
}
