//! Club domain - the functional team a member belongs to

use serde::{Deserialize, Serialize};
use std::fmt;

/// Functional domain within the club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ClubDomain {
    Technical,
    Design,
    Content,
    Management,
    Media,
}

impl ClubDomain {
    /// Database/API string representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Design => "Design",
            Self::Content => "Content",
            Self::Management => "Management",
            Self::Media => "Media",
        }
    }

    /// Parse from a stored string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Technical" => Some(Self::Technical),
            "Design" => Some(Self::Design),
            "Content" => Some(Self::Content),
            "Management" => Some(Self::Management),
            "Media" => Some(Self::Media),
            _ => None,
        }
    }
}

impl fmt::Display for ClubDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for domain in [
            ClubDomain::Technical,
            ClubDomain::Design,
            ClubDomain::Content,
            ClubDomain::Management,
            ClubDomain::Media,
        ] {
            assert_eq!(ClubDomain::parse(domain.as_str()), Some(domain));
        }
        assert_eq!(ClubDomain::parse("Astrology"), None);
    }
}
