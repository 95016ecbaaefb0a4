//! Usage profiles and per-profile scoring weights
//!
//! A usage profile states what the machine is primarily used for and selects
//! the component weighting applied by [`crate::score`]. The canonical set is
//! closed; user-facing labels from older clients map onto it through an
//! explicit table. Unknown labels are rejected, never defaulted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical usage profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UsageProfile {
    Gaming,
    Work,
    ContentCreation,
    General,
}

/// Component weights for one usage profile; each set sums to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub cpu: f64,
    pub gpu: f64,
    pub ram: f64,
}

impl UsageProfile {
    /// Canonical wire label, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageProfile::Gaming => "gaming",
            UsageProfile::Work => "work",
            UsageProfile::ContentCreation => "content-creation",
            UsageProfile::General => "general",
        }
    }

    /// Parse a profile label as supplied by API clients.
    ///
    /// Accepts the four canonical labels plus every user-facing label older
    /// clients send. The mapping is total over the known set; anything else
    /// is `None` so the caller can reject it. There is deliberately no
    /// catch-all onto `General`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            // canonical
            "gaming" => Some(UsageProfile::Gaming),
            "work" => Some(UsageProfile::Work),
            "content-creation" => Some(UsageProfile::ContentCreation),
            "general" => Some(UsageProfile::General),
            // user-facing labels from the first-generation client
            "productivity" => Some(UsageProfile::Work),
            "content_creation" => Some(UsageProfile::ContentCreation),
            "development" => Some(UsageProfile::General),
            "office" => Some(UsageProfile::General),
            "student" => Some(UsageProfile::General),
            _ => None,
        }
    }

    /// Scoring weights for this profile.
    pub fn weights(&self) -> ScoreWeights {
        match self {
            UsageProfile::Gaming => ScoreWeights {
                cpu: 0.4,
                gpu: 0.5,
                ram: 0.1,
            },
            UsageProfile::Work => ScoreWeights {
                cpu: 0.6,
                gpu: 0.2,
                ram: 0.2,
            },
            UsageProfile::ContentCreation => ScoreWeights {
                cpu: 0.5,
                gpu: 0.3,
                ram: 0.2,
            },
            UsageProfile::General => ScoreWeights {
                cpu: 0.5,
                gpu: 0.3,
                ram: 0.2,
            },
        }
    }
}

impl fmt::Display for UsageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [UsageProfile; 4] = [
        UsageProfile::Gaming,
        UsageProfile::Work,
        UsageProfile::ContentCreation,
        UsageProfile::General,
    ];

    #[test]
    fn test_serde_uses_kebab_case_labels() {
        for profile in ALL {
            let json = serde_json::to_string(&profile).unwrap();
            assert_eq!(json, format!("\"{}\"", profile.as_str()));
            let back: UsageProfile = serde_json::from_str(&json).unwrap();
            assert_eq!(back, profile);
        }
    }

    #[test]
    fn test_label_mapping_covers_every_user_label() {
        assert_eq!(UsageProfile::from_label("gaming"), Some(UsageProfile::Gaming));
        assert_eq!(UsageProfile::from_label("productivity"), Some(UsageProfile::Work));
        assert_eq!(
            UsageProfile::from_label("content_creation"),
            Some(UsageProfile::ContentCreation)
        );
        assert_eq!(UsageProfile::from_label("development"), Some(UsageProfile::General));
        assert_eq!(UsageProfile::from_label("office"), Some(UsageProfile::General));
        assert_eq!(UsageProfile::from_label("student"), Some(UsageProfile::General));
        // canonical labels parse to themselves
        for profile in ALL {
            assert_eq!(UsageProfile::from_label(profile.as_str()), Some(profile));
        }
    }

    #[test]
    fn test_unknown_label_is_rejected_not_defaulted() {
        assert_eq!(UsageProfile::from_label("crypto-mining"), None);
        assert_eq!(UsageProfile::from_label(""), None);
        assert_eq!(UsageProfile::from_label("GAMING"), None);
    }

    #[test]
    fn test_weights_sum_to_one() {
        for profile in ALL {
            let w = profile.weights();
            assert!(
                (w.cpu + w.gpu + w.ram - 1.0).abs() < 1e-9,
                "weights for {profile} must sum to 1.0"
            );
        }
    }
}
