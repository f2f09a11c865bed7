//! Display attributes for moods, kept apart from the inference types so the
//! core stays free of presentation concerns.

use super::fusion::MoodFusion;
use super::types::{Mood, MoodCategory};

/// Glyph used for custom moods
pub const CUSTOM_GLYPH: &str = "🎵";

/// Color name used for custom moods
pub const CUSTOM_COLOR: &str = "gray";

pub struct MoodPresentation;

impl MoodPresentation {
    pub fn glyph(category: MoodCategory) -> &'static str {
        match category {
            MoodCategory::Happy => "😊",
            MoodCategory::Sad => "😢",
            MoodCategory::Angry => "😡",
            MoodCategory::Frustrated => "😤",
            MoodCategory::Energetic => "⚡",
            MoodCategory::Calm => "😌",
            MoodCategory::Nostalgic => "📼",
            MoodCategory::Romantic => "💕",
            MoodCategory::Melancholic => "🌧️",
            MoodCategory::Excited => "🤩",
        }
    }

    pub fn color(category: MoodCategory) -> &'static str {
        match category {
            MoodCategory::Happy => "yellow",
            MoodCategory::Sad => "blue",
            MoodCategory::Angry => "red",
            MoodCategory::Frustrated => "orange",
            MoodCategory::Energetic => "green",
            MoodCategory::Calm => "mint",
            MoodCategory::Nostalgic => "brown",
            MoodCategory::Romantic => "pink",
            MoodCategory::Melancholic => "indigo",
            MoodCategory::Excited => "purple",
        }
    }

    pub fn mood_glyph(mood: &Mood) -> &'static str {
        mood.category().map_or(CUSTOM_GLYPH, Self::glyph)
    }

    pub fn mood_color(mood: &Mood) -> &'static str {
        mood.category().map_or(CUSTOM_COLOR, Self::color)
    }

    /// Both glyphs side by side for a two-mood fusion
    pub fn fusion_glyphs(fusion: &MoodFusion) -> String {
        let mut glyphs = Self::glyph(fusion.primary()).to_string();
        if let Some(secondary) = fusion.secondary() {
            glyphs.push_str(Self::glyph(secondary));
        }
        glyphs
    }

    /// Fusions take the primary mood's color
    pub fn fusion_color(fusion: &MoodFusion) -> &'static str {
        Self::color(fusion.primary())
    }

    /// One line label such as "😊 Happy"
    pub fn label(mood: &Mood) -> String {
        format!("{} {}", Self::mood_glyph(mood), mood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::fusion::FusionIntensity;

    #[test]
    fn test_custom_mood_uses_fallback_attributes() {
        let custom = Mood::Custom("rainy".into());
        assert_eq!(MoodPresentation::mood_glyph(&custom), CUSTOM_GLYPH);
        assert_eq!(MoodPresentation::mood_color(&custom), CUSTOM_COLOR);
        assert_eq!(MoodPresentation::label(&custom), "🎵 rainy");
    }

    #[test]
    fn test_fusion_glyphs_concatenate() {
        let fusion = MoodFusion::new(
            MoodCategory::Happy,
            Some(MoodCategory::Sad),
            FusionIntensity::Moderate,
        )
        .unwrap();
        assert_eq!(MoodPresentation::fusion_glyphs(&fusion), "😊😢");
        assert_eq!(MoodPresentation::fusion_color(&fusion), "yellow");
    }
}
