use super::fusion::MoodFusion;
use super::types::{Intensity, Mood, MoodCategory};

/// Hand-picked phrases for specific mood blends, keyed by (first, second).
/// Lookup tries both orders, so every listed pair is found whichever mood
/// is primary.
const FUSION_PHRASES: &[(MoodCategory, MoodCategory, &str)] = &[
    (MoodCategory::Calm, MoodCategory::Energetic, "chill but energetic music"),
    (MoodCategory::Energetic, MoodCategory::Calm, "energetic but relaxed music"),
    (MoodCategory::Happy, MoodCategory::Sad, "bittersweet uplifting music"),
    (MoodCategory::Sad, MoodCategory::Happy, "melancholic but hopeful music"),
    (MoodCategory::Romantic, MoodCategory::Nostalgic, "romantic nostalgic love songs"),
    (MoodCategory::Nostalgic, MoodCategory::Romantic, "nostalgic romantic music"),
    (MoodCategory::Excited, MoodCategory::Calm, "excited but peaceful music"),
    (MoodCategory::Calm, MoodCategory::Excited, "peaceful but uplifting music"),
    (MoodCategory::Angry, MoodCategory::Calm, "intense but controlled music"),
    (MoodCategory::Calm, MoodCategory::Angry, "relaxed but powerful music"),
    (MoodCategory::Energetic, MoodCategory::Melancholic, "energetic but introspective music"),
    (MoodCategory::Melancholic, MoodCategory::Energetic, "moody but dynamic music"),
    (MoodCategory::Frustrated, MoodCategory::Calm, "frustrated but soothing music"),
    (MoodCategory::Calm, MoodCategory::Frustrated, "peaceful but intense music"),
];

/// Phrases per (category, intensity), rows in [`MoodCategory::ALL`] order and
/// columns in [`Intensity::ALL`] order:
/// chill, intense, gentle, upbeat, mellow, dark, dreamy, soft, heavy, uplifting
const ENHANCED_PHRASES: [[&str; 10]; 10] = [
    // happy
    [
        "chill feel good music",
        "euphoric high energy pop",
        "gentle sunny acoustic songs",
        "upbeat feel good hits",
        "mellow happy indie",
        "bittersweet upbeat indie",
        "dreamy summer pop",
        "soft happy acoustic",
        "heavy feel good rock anthems",
        "uplifting happy anthems",
    ],
    // sad
    [
        "chill sad lofi",
        "intense emotional ballads",
        "gentle sad piano",
        "upbeat sad pop",
        "mellow sad acoustic",
        "dark sad ambient",
        "dreamy sad indie",
        "soft sad songs",
        "heavy emotional rock",
        "uplifting songs for sad days",
    ],
    // angry
    [
        "chill angry hip hop",
        "intense aggressive metal",
        "gentle angry alternative",
        "upbeat angry punk",
        "mellow angry grunge",
        "dark aggressive industrial",
        "dreamy angry shoegaze",
        "soft angry indie",
        "heavy rage metal",
        "empowering angry anthems",
    ],
    // frustrated
    [
        "chill frustrated lofi beats",
        "intense frustrated rock",
        "gentle frustrated acoustic",
        "upbeat frustrated pop punk",
        "mellow frustrated alternative",
        "dark frustrated alternative",
        "dreamy frustrated indie",
        "soft frustrated singer songwriter",
        "heavy frustrated nu metal",
        "uplifting songs for frustrating days",
    ],
    // energetic
    [
        "chill energetic house",
        "intense workout music",
        "gentle energetic indie pop",
        "upbeat energetic dance hits",
        "mellow energetic funk",
        "dark energetic techno",
        "dreamy energetic synthwave",
        "soft energetic acoustic pop",
        "heavy energetic rock",
        "uplifting energetic anthems",
    ],
    // calm
    [
        "chill relaxing lofi",
        "intense calm cinematic ambient",
        "gentle calm piano",
        "upbeat calm acoustic",
        "mellow calm jazz",
        "dark calm ambient",
        "dreamy calm ambient",
        "soft calm acoustic",
        "heavy calm post rock",
        "uplifting calm instrumental",
    ],
    // nostalgic
    [
        "chill nostalgic throwbacks",
        "intense nostalgic rock classics",
        "gentle nostalgic folk",
        "upbeat nostalgic 80s hits",
        "mellow nostalgic oldies",
        "dark nostalgic new wave",
        "dreamy nostalgic synthpop",
        "soft nostalgic ballads",
        "heavy nostalgic 90s rock",
        "uplifting nostalgic classics",
    ],
    // romantic
    [
        "chill romantic r&b",
        "intense passionate love songs",
        "gentle romantic acoustic",
        "upbeat romantic pop",
        "mellow romantic jazz",
        "dark romantic ballads",
        "dreamy romantic indie",
        "soft romantic love songs",
        "heavy romantic power ballads",
        "uplifting romantic love songs",
    ],
    // melancholic
    [
        "chill melancholic lofi",
        "intense melancholic post rock",
        "gentle melancholic piano",
        "upbeat melancholic indie pop",
        "mellow melancholic folk",
        "dark melancholic ambient",
        "dreamy melancholic dream pop",
        "soft melancholic acoustic",
        "heavy melancholic doom",
        "uplifting melancholic indie",
    ],
    // excited
    [
        "chill excited indie dance",
        "intense excited edm",
        "gentle excited pop",
        "upbeat excited party hits",
        "mellow excited funk",
        "dark excited electro",
        "dreamy excited synthpop",
        "soft excited acoustic pop",
        "heavy excited rock anthems",
        "uplifting excited anthems",
    ],
];

/// Search phrase derivation for moods and fusions
pub struct SearchTerms;

impl SearchTerms {
    /// `"<modifier> <base phrase>"`, or just the base phrase without an intensity
    pub fn for_mood(mood: &Mood, intensity: Option<Intensity>) -> String {
        Self::prefixed(intensity.map(Intensity::modifier), mood.base_phrase())
    }

    /// Hand-authored phrase for a named mood at a given intensity. Falls back
    /// to the base phrase without an intensity; custom moods get the modifier
    /// prefixed onto their text.
    pub fn enhanced(mood: &Mood, intensity: Option<Intensity>) -> String {
        match (mood, intensity) {
            (Mood::Named(category), Some(intensity)) => {
                ENHANCED_PHRASES[category.index()][intensity.index()].to_string()
            }
            _ => Self::for_mood(mood, intensity),
        }
    }

    /// Curated phrase for the pair when one exists, otherwise
    /// `"<primary base> with <secondary base>"`; both prefixed with the
    /// fusion intensity modifier.
    pub fn for_fusion(fusion: &MoodFusion) -> String {
        let modifier = Some(fusion.intensity().modifier());
        let primary = fusion.primary();

        let Some(secondary) = fusion.secondary() else {
            return Self::prefixed(modifier, primary.base_phrase());
        };

        match Self::curated_fusion_phrase(primary, secondary) {
            Some(phrase) => Self::prefixed(modifier, phrase),
            None => Self::prefixed(
                modifier,
                &format!("{} with {}", primary.base_phrase(), secondary.base_phrase()),
            ),
        }
    }

    /// Curated phrase for a pair of moods, trying (a, b) before (b, a)
    pub fn curated_fusion_phrase(a: MoodCategory, b: MoodCategory) -> Option<&'static str> {
        let lookup = |first: MoodCategory, second: MoodCategory| {
            FUSION_PHRASES
                .iter()
                .find(|(x, y, _)| *x == first && *y == second)
                .map(|(_, _, phrase)| *phrase)
        };
        lookup(a, b).or_else(|| lookup(b, a))
    }

    fn prefixed(modifier: Option<&str>, phrase: &str) -> String {
        match modifier {
            Some(modifier) => format!("{modifier} {phrase}").trim().to_string(),
            None => phrase.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::fusion::FusionIntensity;

    #[test]
    fn test_plain_mood_term() {
        let calm = Mood::Named(MoodCategory::Calm);
        assert_eq!(SearchTerms::for_mood(&calm, None), "calm relaxing music");
        assert_eq!(
            SearchTerms::for_mood(&calm, Some(Intensity::Dreamy)),
            "dreamy calm relaxing music"
        );
    }

    #[test]
    fn test_custom_mood_term() {
        let custom = Mood::Custom("jazz music".to_string());
        assert_eq!(SearchTerms::for_mood(&custom, None), "jazz music");
        assert_eq!(
            SearchTerms::enhanced(&custom, Some(Intensity::Chill)),
            "chill jazz music"
        );
    }

    #[test]
    fn test_enhanced_table_lookup() {
        let sad = Mood::Named(MoodCategory::Sad);
        assert_eq!(SearchTerms::enhanced(&sad, Some(Intensity::Gentle)), "gentle sad piano");
        assert_eq!(SearchTerms::enhanced(&sad, None), "sad melancholy mood music");
    }

    #[test]
    fn test_enhanced_table_is_complete() {
        for row in ENHANCED_PHRASES.iter() {
            for phrase in row {
                assert!(!phrase.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_curated_fusion_lookup_tries_both_orders() {
        assert_eq!(
            SearchTerms::curated_fusion_phrase(MoodCategory::Calm, MoodCategory::Energetic),
            Some("chill but energetic music")
        );
        assert_eq!(
            SearchTerms::curated_fusion_phrase(MoodCategory::Energetic, MoodCategory::Calm),
            Some("energetic but relaxed music")
        );
        assert_eq!(
            SearchTerms::curated_fusion_phrase(MoodCategory::Romantic, MoodCategory::Excited),
            None
        );
    }

    #[test]
    fn test_fusion_term_with_curated_phrase() {
        let fusion = MoodFusion::new(
            MoodCategory::Angry,
            Some(MoodCategory::Calm),
            FusionIntensity::Strong,
        )
        .unwrap();
        assert_eq!(fusion.search_term(), "intense intense but controlled music");

        let moderate = MoodFusion::new(
            MoodCategory::Happy,
            Some(MoodCategory::Sad),
            FusionIntensity::Moderate,
        )
        .unwrap();
        assert_eq!(moderate.search_term(), "bittersweet uplifting music");
    }

    #[test]
    fn test_fusion_term_generated_fallback() {
        let fusion = MoodFusion::new(
            MoodCategory::Romantic,
            Some(MoodCategory::Excited),
            FusionIntensity::Subtle,
        )
        .unwrap();
        assert_eq!(
            fusion.search_term(),
            "gentle romantic love songs with excited party music"
        );
    }

    #[test]
    fn test_single_fusion_term() {
        let fusion = MoodFusion::single(MoodCategory::Calm, FusionIntensity::Moderate);
        assert_eq!(fusion.search_term(), "calm relaxing music");
    }
}
