use super::inference::MoodInference;
use super::keywords::{FUSION_CONNECTORS, STRONG_MARKERS, SUBTLE_MARKERS};
use super::search_terms::SearchTerms;
use super::types::{Mood, MoodCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse intensity of a fusion, detected from emphasis and softening words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FusionIntensity {
    Subtle,
    #[default]
    Moderate,
    Strong,
}

impl FusionIntensity {
    /// Prefix applied to fusion search phrases (empty for moderate)
    pub fn modifier(self) -> &'static str {
        match self {
            FusionIntensity::Subtle => "gentle",
            FusionIntensity::Moderate => "",
            FusionIntensity::Strong => "intense",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FusionIntensity::Subtle => "subtle",
            FusionIntensity::Moderate => "moderate",
            FusionIntensity::Strong => "strong",
        }
    }

    /// Strong if the text carries an emphasis word, subtle if it carries a
    /// softening word, moderate otherwise
    pub fn detect(text: &str) -> FusionIntensity {
        let lower = text.to_lowercase();
        if STRONG_MARKERS.iter().any(|marker| lower.contains(marker)) {
            FusionIntensity::Strong
        } else if SUBTLE_MARKERS.iter().any(|marker| lower.contains(marker)) {
            FusionIntensity::Subtle
        } else {
            FusionIntensity::Moderate
        }
    }
}

impl fmt::Display for FusionIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A blend of two named moods.
///
/// Holding [`MoodCategory`] rather than [`Mood`] keeps custom moods out of a
/// fusion; [`MoodFusion::new`] rejects a secondary equal to the primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodFusion {
    primary: MoodCategory,
    secondary: Option<MoodCategory>,
    intensity: FusionIntensity,
}

impl MoodFusion {
    /// Returns `None` when `secondary` equals `primary`
    pub fn new(
        primary: MoodCategory,
        secondary: Option<MoodCategory>,
        intensity: FusionIntensity,
    ) -> Option<Self> {
        if secondary == Some(primary) {
            return None;
        }
        Some(Self {
            primary,
            secondary,
            intensity,
        })
    }

    /// A fusion of a single mood, at the given intensity
    pub fn single(primary: MoodCategory, intensity: FusionIntensity) -> Self {
        Self {
            primary,
            secondary: None,
            intensity,
        }
    }

    pub fn primary(&self) -> MoodCategory {
        self.primary
    }

    pub fn secondary(&self) -> Option<MoodCategory> {
        self.secondary
    }

    pub fn intensity(&self) -> FusionIntensity {
        self.intensity
    }

    /// "Calm + Energetic", or just the primary name
    pub fn display_name(&self) -> String {
        match self.secondary {
            Some(secondary) => format!("{} + {}", self.primary.name(), secondary.name()),
            None => self.primary.name().to_string(),
        }
    }

    pub fn search_term(&self) -> String {
        SearchTerms::for_fusion(self)
    }

    /// Detect a mixed mood such as "calm but energetic".
    ///
    /// The text is split around the first connector word found (in table
    /// order) and the pieces either side of its first occurrence are inferred
    /// on their own. Returns `None` when there is no connector, either piece
    /// is empty, either piece is not a named mood, or both infer the same mood.
    pub fn infer(text: &str) -> Option<MoodFusion> {
        let lower = text.to_lowercase();

        let connector = FUSION_CONNECTORS
            .iter()
            .find(|connector| lower.contains(*connector))?;

        let mut parts = lower.split(connector).map(str::trim);
        let (first, second) = (parts.next()?, parts.next()?);
        if first.is_empty() || second.is_empty() {
            return None;
        }

        let (first, _) = MoodInference::infer_mood(first);
        let (second, _) = MoodInference::infer_mood(second);

        let (Mood::Named(primary), Mood::Named(secondary)) = (first, second) else {
            return None;
        };

        let fusion = MoodFusion::new(primary, Some(secondary), FusionIntensity::detect(&lower));
        if let Some(fusion) = &fusion {
            log::debug!(
                "Fusion '{}' detected around connector '{connector}'",
                fusion.display_name()
            );
        }
        fusion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_equal_moods() {
        assert!(
            MoodFusion::new(MoodCategory::Sad, Some(MoodCategory::Sad), FusionIntensity::Moderate)
                .is_none()
        );
        assert!(
            MoodFusion::new(MoodCategory::Sad, Some(MoodCategory::Happy), FusionIntensity::Moderate)
                .is_some()
        );
        assert!(MoodFusion::new(MoodCategory::Sad, None, FusionIntensity::Strong).is_some());
    }

    #[test]
    fn test_default_intensity_is_moderate() {
        assert_eq!(FusionIntensity::default(), FusionIntensity::Moderate);
        assert_eq!(FusionIntensity::default().to_string(), "moderate");
        assert_eq!(FusionIntensity::Strong.to_string(), "strong");
    }

    #[test]
    fn test_detect_intensity() {
        assert_eq!(FusionIntensity::detect("REALLY happy"), FusionIntensity::Strong);
        assert_eq!(FusionIntensity::detect("kind of sad"), FusionIntensity::Subtle);
        assert_eq!(FusionIntensity::detect("a bit calm"), FusionIntensity::Subtle);
        // emphasis wins over softening
        assert_eq!(
            FusionIntensity::detect("slightly sad but very excited"),
            FusionIntensity::Strong
        );
        assert_eq!(FusionIntensity::detect("calm"), FusionIntensity::Moderate);
    }

    #[test]
    fn test_display_name() {
        let fusion =
            MoodFusion::new(MoodCategory::Calm, Some(MoodCategory::Energetic), FusionIntensity::Moderate)
                .unwrap();
        assert_eq!(fusion.display_name(), "Calm + Energetic");
        assert_eq!(
            MoodFusion::single(MoodCategory::Sad, FusionIntensity::Moderate).display_name(),
            "Sad"
        );
    }

    #[test]
    fn test_infer_requires_connector() {
        assert!(MoodFusion::infer("calm energetic").is_none());
    }

    #[test]
    fn test_infer_requires_two_parts() {
        assert!(MoodFusion::infer("happy and").is_none());
        assert!(MoodFusion::infer("but").is_none());
    }

    #[test]
    fn test_infer_rejects_empty_piece_around_connector() {
        // leading connector leaves nothing before it
        assert!(MoodFusion::infer("but happy but sad").is_none());
        // doubled connector leaves nothing between them
        assert!(MoodFusion::infer("happy but but sad").is_none());
        // only the pieces around the first occurrence count
        let fusion = MoodFusion::infer("happy but sad but angry").unwrap();
        assert_eq!(fusion.primary(), MoodCategory::Happy);
        assert_eq!(fusion.secondary(), Some(MoodCategory::Sad));
    }

    #[test]
    fn test_infer_rejects_custom_halves() {
        // second half has no keywords
        assert!(MoodFusion::infer("happy but xyzzy").is_none());
        // first half is a genre
        assert!(MoodFusion::infer("jazz but sad").is_none());
    }

    #[test]
    fn test_infer_uses_first_connector_in_table_order() {
        // "but" is checked before "and", even though "and" appears first
        let fusion = MoodFusion::infer("sad and lonely but hopeful and happy").unwrap();
        assert_eq!(fusion.primary(), MoodCategory::Sad);
        assert_eq!(fusion.secondary(), Some(MoodCategory::Happy));
    }
}
