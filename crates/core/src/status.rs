//! Status classification for validation records.
//!
//! The sheet and the remote store carry free-form status labels. Labels are
//! mapped onto three classes with a configurable [`StatusVocabulary`] because
//! different form versions used different words for the same meaning.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Default labels
// ---------------------------------------------------------------------------

/// Valid, time-bounded authorization.
pub const STATUS_VALID: &str = "유효";
/// Staff vehicle: permanent authorization.
pub const STATUS_STAFF_VEHICLE: &str = "직원차량";
/// Alternate permanent label used by later form versions.
pub const STATUS_PERMANENT: &str = "영구";

pub const DEFAULT_VALID_STATUSES: &[&str] = &[STATUS_VALID];
pub const DEFAULT_PERMANENT_STATUSES: &[&str] = &[STATUS_STAFF_VEHICLE, STATUS_PERMANENT];

// ---------------------------------------------------------------------------
// StatusClass
// ---------------------------------------------------------------------------

/// The priority class of a record. Ordered `Invalid < ValidTemporary < Permanent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    Invalid,
    ValidTemporary,
    Permanent,
}

impl StatusClass {
    /// Permanent and valid-temporary both count as "valid".
    pub fn is_valid(self) -> bool {
        !matches!(self, StatusClass::Invalid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::ValidTemporary => "valid_temporary",
            Self::Permanent => "permanent",
        }
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StatusVocabulary
// ---------------------------------------------------------------------------

/// The marker strings recognised as valid and as permanent.
///
/// Labels are compared after trimming. A label listed in both sets is
/// permanent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StatusVocabulary {
    #[validate(length(min = 1, message = "at least one valid status label is required"))]
    pub valid: Vec<String>,
    #[validate(length(min = 1, message = "at least one permanent status label is required"))]
    pub permanent: Vec<String>,
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            valid: to_owned(DEFAULT_VALID_STATUSES),
            permanent: to_owned(DEFAULT_PERMANENT_STATUSES),
        }
    }
}

impl StatusVocabulary {
    /// Build a vocabulary from explicit label lists, rejecting empty sets and
    /// blank labels.
    pub fn new(valid: Vec<String>, permanent: Vec<String>) -> Result<Self, CoreError> {
        let vocab = Self {
            valid: normalize(valid),
            permanent: normalize(permanent),
        };
        vocab.validate()?;
        Ok(vocab)
    }

    /// Parse comma-separated label lists, falling back to the defaults for
    /// any list that is `None`.
    pub fn from_lists(valid: Option<&str>, permanent: Option<&str>) -> Result<Self, CoreError> {
        let defaults = Self::default();
        let valid = valid.map(split_labels).unwrap_or(defaults.valid);
        let permanent = permanent.map(split_labels).unwrap_or(defaults.permanent);
        Self::new(valid, permanent)
    }

    /// Classify a raw status label.
    pub fn classify(&self, status: &str) -> StatusClass {
        let status = status.trim();
        if status.is_empty() {
            StatusClass::Invalid
        } else if self.permanent.iter().any(|m| m == status) {
            StatusClass::Permanent
        } else if self.valid.iter().any(|m| m == status) {
            StatusClass::ValidTemporary
        } else {
            StatusClass::Invalid
        }
    }

    /// Shorthand for `classify(status).is_valid()`.
    pub fn is_valid(&self, status: &str) -> bool {
        self.classify(status).is_valid()
    }
}

fn to_owned(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

fn normalize(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        if !label.is_empty() && !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary_classifies_known_labels() {
        let vocab = StatusVocabulary::default();
        assert_eq!(vocab.classify("유효"), StatusClass::ValidTemporary);
        assert_eq!(vocab.classify("직원차량"), StatusClass::Permanent);
        assert_eq!(vocab.classify("영구"), StatusClass::Permanent);
        assert_eq!(vocab.classify("무효"), StatusClass::Invalid);
        assert_eq!(vocab.classify(""), StatusClass::Invalid);
    }

    #[test]
    fn unknown_labels_are_invalid() {
        let vocab = StatusVocabulary::default();
        assert_eq!(vocab.classify("valid"), StatusClass::Invalid);
        assert_eq!(vocab.classify("유효함"), StatusClass::Invalid);
        assert!(!vocab.is_valid("???"));
    }

    #[test]
    fn labels_are_trimmed_before_matching() {
        let vocab = StatusVocabulary::default();
        assert_eq!(vocab.classify(" 유효 "), StatusClass::ValidTemporary);
        assert_eq!(vocab.classify("   "), StatusClass::Invalid);
    }

    #[test]
    fn permanent_wins_when_label_is_in_both_sets() {
        let vocab =
            StatusVocabulary::new(vec!["ok".into(), "staff".into()], vec!["staff".into()]).unwrap();
        assert_eq!(vocab.classify("staff"), StatusClass::Permanent);
        assert_eq!(vocab.classify("ok"), StatusClass::ValidTemporary);
    }

    #[test]
    fn class_ordering_matches_priority() {
        assert!(StatusClass::Permanent > StatusClass::ValidTemporary);
        assert!(StatusClass::ValidTemporary > StatusClass::Invalid);
        assert!(StatusClass::Permanent.is_valid());
        assert!(StatusClass::ValidTemporary.is_valid());
        assert!(!StatusClass::Invalid.is_valid());
    }

    #[test]
    fn from_lists_parses_comma_separated_labels() {
        let vocab = StatusVocabulary::from_lists(Some(" 유효 , ok,"), None).unwrap();
        assert_eq!(vocab.valid, vec!["유효".to_string(), "ok".to_string()]);
        assert_eq!(vocab.permanent, StatusVocabulary::default().permanent);
    }

    #[test]
    fn empty_label_set_is_rejected() {
        let err = StatusVocabulary::from_lists(Some(" , "), None).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = StatusVocabulary::new(vec!["유효".into()], vec![]).unwrap_err();
        assert!(err.to_string().contains("permanent"));
    }
}
