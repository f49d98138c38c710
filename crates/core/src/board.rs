//! School Board Variants
//!
//! Every curriculum the tutor serves is identified by a `BoardVariant`. The
//! variant selects the curriculum registry entry, the prompt template and the
//! default validation strictness, so one pipeline serves all boards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The school boards the tutor knows how to prompt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardVariant {
    /// Andhra Pradesh Board of Secondary Education (SSC).
    ApSsc,
    /// Central Board of Secondary Education.
    Cbse,
    /// Indian Certificate of Secondary Education.
    Icse,
}

impl BoardVariant {
    pub const ALL: [BoardVariant; 3] = [BoardVariant::ApSsc, BoardVariant::Cbse, BoardVariant::Icse];

    /// The configuration key for this board (`ap_ssc`, `cbse`, `icse`).
    pub fn key(&self) -> &'static str {
        match self {
            BoardVariant::ApSsc => "ap_ssc",
            BoardVariant::Cbse => "cbse",
            BoardVariant::Icse => "icse",
        }
    }

    /// Human readable board name, as shown to students and returned in answer metadata.
    pub fn display_name(&self) -> &'static str {
        match self {
            BoardVariant::ApSsc => "AP SSC",
            BoardVariant::Cbse => "CBSE",
            BoardVariant::Icse => "ICSE",
        }
    }

    /// The validation strictness each board ships with.
    ///
    /// AP SSC checks both subject and chapter, CBSE only the subject, and ICSE
    /// accepts any subject/chapter pair.
    pub fn default_policy(&self) -> ValidationPolicy {
        match self {
            BoardVariant::ApSsc => ValidationPolicy::STRICT,
            BoardVariant::Cbse => ValidationPolicy::SUBJECT_ONLY,
            BoardVariant::Icse => ValidationPolicy::NONE,
        }
    }
}

impl fmt::Display for BoardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown board '{0}' (expected one of: ap_ssc, cbse, icse)")]
pub struct UnknownBoard(pub String);

impl FromStr for BoardVariant {
    type Err = UnknownBoard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "apssc" | "ap" => Ok(BoardVariant::ApSsc),
            "cbse" => Ok(BoardVariant::Cbse),
            "icse" => Ok(BoardVariant::Icse),
            _ => Err(UnknownBoard(s.to_string())),
        }
    }
}

/// Which curriculum checks the validator applies for a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub enforce_subject: bool,
    pub enforce_chapter: bool,
}

impl ValidationPolicy {
    pub const STRICT: ValidationPolicy = ValidationPolicy {
        enforce_subject: true,
        enforce_chapter: true,
    };
    pub const SUBJECT_ONLY: ValidationPolicy = ValidationPolicy {
        enforce_subject: true,
        enforce_chapter: false,
    };
    pub const NONE: ValidationPolicy = ValidationPolicy {
        enforce_subject: false,
        enforce_chapter: false,
    };

    /// Short name used in configuration and in the curriculum endpoint.
    pub fn name(&self) -> &'static str {
        match (self.enforce_subject, self.enforce_chapter) {
            (true, true) => "strict",
            (true, false) => "subject",
            (false, true) => "chapter",
            (false, false) => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown validation policy '{0}' (expected one of: strict, subject, none)")]
pub struct UnknownPolicy(pub String);

impl FromStr for ValidationPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" | "chapter" => Ok(ValidationPolicy::STRICT),
            "subject" | "subject_only" => Ok(ValidationPolicy::SUBJECT_ONLY),
            "none" | "off" => Ok(ValidationPolicy::NONE),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_accepts_common_spellings() {
        assert_eq!("ap_ssc".parse::<BoardVariant>().unwrap(), BoardVariant::ApSsc);
        assert_eq!("AP SSC".parse::<BoardVariant>().unwrap(), BoardVariant::ApSsc);
        assert_eq!("ap-ssc".parse::<BoardVariant>().unwrap(), BoardVariant::ApSsc);
        assert_eq!("CBSE".parse::<BoardVariant>().unwrap(), BoardVariant::Cbse);
        assert_eq!(" icse ".parse::<BoardVariant>().unwrap(), BoardVariant::Icse);
    }

    #[test]
    fn test_board_from_str_rejects_unknown() {
        let err = "igcse".parse::<BoardVariant>().unwrap_err();
        assert_eq!(err, UnknownBoard("igcse".to_string()));
        assert!(err.to_string().contains("ap_ssc"));
    }

    #[test]
    fn test_board_key_round_trips() {
        for board in BoardVariant::ALL {
            assert_eq!(board.key().parse::<BoardVariant>().unwrap(), board);
        }
    }

    #[test]
    fn test_default_policies_differ_per_board() {
        assert_eq!(BoardVariant::ApSsc.default_policy(), ValidationPolicy::STRICT);
        assert_eq!(BoardVariant::Cbse.default_policy(), ValidationPolicy::SUBJECT_ONLY);
        assert_eq!(BoardVariant::Icse.default_policy(), ValidationPolicy::NONE);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<ValidationPolicy>().unwrap(), ValidationPolicy::STRICT);
        assert_eq!("Subject".parse::<ValidationPolicy>().unwrap(), ValidationPolicy::SUBJECT_ONLY);
        assert_eq!("none".parse::<ValidationPolicy>().unwrap(), ValidationPolicy::NONE);
        assert!("lenient".parse::<ValidationPolicy>().is_err());
    }

    #[test]
    fn test_policy_name() {
        assert_eq!(ValidationPolicy::STRICT.name(), "strict");
        assert_eq!(ValidationPolicy::SUBJECT_ONLY.name(), "subject");
        assert_eq!(ValidationPolicy::NONE.name(), "none");
    }

    #[test]
    fn test_board_serializes_as_key() {
        let json = serde_json::to_string(&BoardVariant::ApSsc).unwrap();
        assert_eq!(json, "\"ap_ssc\"");
    }
}
