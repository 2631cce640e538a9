//! Sensitivity level model
//!
//! Levels are derived from the human-readable severity label of a content
//! advisory page. The mapping is fail-closed: any label we do not recognize
//! is treated as `Severe`. All failure paths in the resolver funnel through
//! either `from_label` or an explicit `Severe`, so this is the single place
//! the conservative default lives.

use std::fmt;

/// Integer sensitivity level, ordered from least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SensitivityLevel {
    /// No flagged content
    None = 0,
    /// Mild
    Mild = 1,
    /// Moderate
    Moderate = 2,
    /// Severe, also the conservative default for anything unrecognized
    Severe = 3,
}

impl SensitivityLevel {
    /// Map an advisory severity label to a level.
    ///
    /// Unrecognized or garbled labels map to `Severe`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "None" => Self::None,
            "Mild" => Self::Mild,
            "Moderate" => Self::Moderate,
            "Severe" => Self::Severe,
            _ => Self::Severe,
        }
    }

    /// Parse a stored integer level.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Mild),
            2 => Some(Self::Moderate),
            3 => Some(Self::Severe),
            _ => None,
        }
    }

    /// Integer representation used by the store and config thresholds.
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    /// Human-readable label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

impl fmt::Display for SensitivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping_is_exact() {
        assert_eq!(SensitivityLevel::from_label("None"), SensitivityLevel::None);
        assert_eq!(SensitivityLevel::from_label("Mild"), SensitivityLevel::Mild);
        assert_eq!(
            SensitivityLevel::from_label("Moderate"),
            SensitivityLevel::Moderate
        );
        assert_eq!(
            SensitivityLevel::from_label("Severe"),
            SensitivityLevel::Severe
        );
    }

    #[test]
    fn test_unknown_labels_fail_closed() {
        for label in ["", "none", "MILD", "Unknown", "S\u{00e9}v\u{00e8}re", "3"] {
            assert_eq!(
                SensitivityLevel::from_label(label),
                SensitivityLevel::Severe,
                "label {label:?} should map to Severe"
            );
        }
    }

    #[test]
    fn test_integer_round_trip() {
        for level in [
            SensitivityLevel::None,
            SensitivityLevel::Mild,
            SensitivityLevel::Moderate,
            SensitivityLevel::Severe,
        ] {
            assert_eq!(SensitivityLevel::from_i64(level.as_i64()), Some(level));
        }
        assert_eq!(SensitivityLevel::from_i64(-1), None);
        assert_eq!(SensitivityLevel::from_i64(4), None);
    }

    #[test]
    fn test_ordering_matches_restrictiveness() {
        assert!(SensitivityLevel::None < SensitivityLevel::Mild);
        assert!(SensitivityLevel::Mild < SensitivityLevel::Moderate);
        assert!(SensitivityLevel::Moderate < SensitivityLevel::Severe);
    }
}
