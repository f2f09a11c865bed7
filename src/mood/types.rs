use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of named emotional categories.
///
/// Declaration order is significant: it is the iteration order used by
/// keyword scoring, so it also decides ties between equally scored moods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Happy,
    Sad,
    Angry,
    Frustrated,
    Energetic,
    Calm,
    Nostalgic,
    Romantic,
    Melancholic,
    Excited,
}

impl MoodCategory {
    /// All categories in declaration (tie-break) order
    pub const ALL: [MoodCategory; 10] = [
        MoodCategory::Happy,
        MoodCategory::Sad,
        MoodCategory::Angry,
        MoodCategory::Frustrated,
        MoodCategory::Energetic,
        MoodCategory::Calm,
        MoodCategory::Nostalgic,
        MoodCategory::Romantic,
        MoodCategory::Melancholic,
        MoodCategory::Excited,
    ];

    /// Position of this category in [`MoodCategory::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lower-case tag, used for store keys and the wire format
    pub fn tag(self) -> &'static str {
        match self {
            MoodCategory::Happy => "happy",
            MoodCategory::Sad => "sad",
            MoodCategory::Angry => "angry",
            MoodCategory::Frustrated => "frustrated",
            MoodCategory::Energetic => "energetic",
            MoodCategory::Calm => "calm",
            MoodCategory::Nostalgic => "nostalgic",
            MoodCategory::Romantic => "romantic",
            MoodCategory::Melancholic => "melancholic",
            MoodCategory::Excited => "excited",
        }
    }

    /// Capitalised name shown to users ("Happy", "Calm", ...)
    pub fn name(self) -> &'static str {
        match self {
            MoodCategory::Happy => "Happy",
            MoodCategory::Sad => "Sad",
            MoodCategory::Angry => "Angry",
            MoodCategory::Frustrated => "Frustrated",
            MoodCategory::Energetic => "Energetic",
            MoodCategory::Calm => "Calm",
            MoodCategory::Nostalgic => "Nostalgic",
            MoodCategory::Romantic => "Romantic",
            MoodCategory::Melancholic => "Melancholic",
            MoodCategory::Excited => "Excited",
        }
    }

    /// Base search phrase for this category when no intensity applies
    pub fn base_phrase(self) -> &'static str {
        match self {
            MoodCategory::Happy => "happy upbeat mood music",
            MoodCategory::Sad => "sad melancholy mood music",
            MoodCategory::Angry => "angry intense mood music",
            MoodCategory::Frustrated => "frustrated alternative mood music",
            MoodCategory::Energetic => "energetic high energy music",
            MoodCategory::Calm => "calm relaxing music",
            MoodCategory::Nostalgic => "nostalgic throwback music",
            MoodCategory::Romantic => "romantic love songs",
            MoodCategory::Melancholic => "melancholic moody music",
            MoodCategory::Excited => "excited party music",
        }
    }

    /// Look up a category by its tag or name, ignoring case
    pub fn from_tag(tag: &str) -> Option<MoodCategory> {
        let tag = tag.trim().to_lowercase();
        Self::ALL.into_iter().find(|category| category.tag() == tag)
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mood: either one of the named categories or free text.
///
/// Equality is structural, so two custom moods are equal only when their
/// text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "MoodRepr", from = "MoodRepr")]
pub enum Mood {
    Named(MoodCategory),
    Custom(String),
}

impl Mood {
    pub fn category(&self) -> Option<MoodCategory> {
        match self {
            Mood::Named(category) => Some(*category),
            Mood::Custom(_) => None,
        }
    }

    /// Search phrase without any intensity modifier. For a custom mood this
    /// is the custom text itself.
    pub fn base_phrase(&self) -> &str {
        match self {
            Mood::Named(category) => category.base_phrase(),
            Mood::Custom(text) => text,
        }
    }

    /// Stable identity used to key persisted state. Custom moods include
    /// their payload so distinct texts never share an entry.
    pub fn storage_key(&self) -> String {
        match self {
            Mood::Named(category) => category.tag().to_string(),
            Mood::Custom(text) => format!("custom:{text}"),
        }
    }
}

impl From<MoodCategory> for Mood {
    fn from(category: MoodCategory) -> Self {
        Mood::Named(category)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Named(category) => f.write_str(category.name()),
            Mood::Custom(text) => f.write_str(text),
        }
    }
}

impl FromStr for Mood {
    type Err = anyhow::Error;

    /// Category names parse to [`Mood::Named`], any other non-empty text to
    /// [`Mood::Custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(anyhow::anyhow!("Mood cannot be empty"));
        }
        Ok(match MoodCategory::from_tag(s) {
            Some(category) => Mood::Named(category),
            None => Mood::Custom(s.to_string()),
        })
    }
}

/// Persisted shape of a [`Mood`]: `{"type": "happy"}` or
/// `{"type": "custom", "customValue": "..."}`
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum MoodRepr {
    Happy,
    Sad,
    Angry,
    Frustrated,
    Energetic,
    Calm,
    Nostalgic,
    Romantic,
    Melancholic,
    Excited,
    Custom {
        #[serde(rename = "customValue")]
        custom_value: String,
    },
}

impl From<Mood> for MoodRepr {
    fn from(mood: Mood) -> Self {
        match mood {
            Mood::Named(MoodCategory::Happy) => MoodRepr::Happy,
            Mood::Named(MoodCategory::Sad) => MoodRepr::Sad,
            Mood::Named(MoodCategory::Angry) => MoodRepr::Angry,
            Mood::Named(MoodCategory::Frustrated) => MoodRepr::Frustrated,
            Mood::Named(MoodCategory::Energetic) => MoodRepr::Energetic,
            Mood::Named(MoodCategory::Calm) => MoodRepr::Calm,
            Mood::Named(MoodCategory::Nostalgic) => MoodRepr::Nostalgic,
            Mood::Named(MoodCategory::Romantic) => MoodRepr::Romantic,
            Mood::Named(MoodCategory::Melancholic) => MoodRepr::Melancholic,
            Mood::Named(MoodCategory::Excited) => MoodRepr::Excited,
            Mood::Custom(custom_value) => MoodRepr::Custom { custom_value },
        }
    }
}

impl From<MoodRepr> for Mood {
    fn from(repr: MoodRepr) -> Self {
        match repr {
            MoodRepr::Happy => Mood::Named(MoodCategory::Happy),
            MoodRepr::Sad => Mood::Named(MoodCategory::Sad),
            MoodRepr::Angry => Mood::Named(MoodCategory::Angry),
            MoodRepr::Frustrated => Mood::Named(MoodCategory::Frustrated),
            MoodRepr::Energetic => Mood::Named(MoodCategory::Energetic),
            MoodRepr::Calm => Mood::Named(MoodCategory::Calm),
            MoodRepr::Nostalgic => Mood::Named(MoodCategory::Nostalgic),
            MoodRepr::Romantic => Mood::Named(MoodCategory::Romantic),
            MoodRepr::Melancholic => Mood::Named(MoodCategory::Melancholic),
            MoodRepr::Excited => Mood::Named(MoodCategory::Excited),
            MoodRepr::Custom { custom_value } => Mood::Custom(custom_value),
        }
    }
}

/// Descriptive modifier prefixed onto a search phrase.
///
/// Declaration order is the detection priority when text contains more
/// than one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Chill,
    Intense,
    Gentle,
    Upbeat,
    Mellow,
    Dark,
    Dreamy,
    Soft,
    Heavy,
    Uplifting,
}

impl Intensity {
    pub const ALL: [Intensity; 10] = [
        Intensity::Chill,
        Intensity::Intense,
        Intensity::Gentle,
        Intensity::Upbeat,
        Intensity::Mellow,
        Intensity::Dark,
        Intensity::Dreamy,
        Intensity::Soft,
        Intensity::Heavy,
        Intensity::Uplifting,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Word prefixed onto search phrases; also the token detected in text
    pub fn modifier(self) -> &'static str {
        match self {
            Intensity::Chill => "chill",
            Intensity::Intense => "intense",
            Intensity::Gentle => "gentle",
            Intensity::Upbeat => "upbeat",
            Intensity::Mellow => "mellow",
            Intensity::Dark => "dark",
            Intensity::Dreamy => "dreamy",
            Intensity::Soft => "soft",
            Intensity::Heavy => "heavy",
            Intensity::Uplifting => "uplifting",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.modifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_matches_index() {
        for (i, category) in MoodCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
        for (i, intensity) in Intensity::ALL.iter().enumerate() {
            assert_eq!(intensity.index(), i);
        }
    }

    #[test]
    fn test_custom_mood_equality_uses_text() {
        assert_eq!(Mood::Custom("jazz music".into()), Mood::Custom("jazz music".into()));
        assert_ne!(Mood::Custom("jazz music".into()), Mood::Custom("rock music".into()));
        assert_ne!(Mood::Named(MoodCategory::Calm), Mood::Custom("Calm".into()));
    }

    #[test]
    fn test_storage_key_includes_custom_payload() {
        assert_eq!(Mood::Named(MoodCategory::Happy).storage_key(), "happy");
        assert_eq!(Mood::Custom("lofi music".into()).storage_key(), "custom:lofi music");
    }

    #[test]
    fn test_parse_mood() {
        assert_eq!("CALM".parse::<Mood>().unwrap(), Mood::Named(MoodCategory::Calm));
        assert_eq!(
            "rainy sunday".parse::<Mood>().unwrap(),
            Mood::Custom("rainy sunday".into())
        );
        assert!("   ".parse::<Mood>().is_err());
    }

    #[test]
    fn test_mood_wire_format() {
        let named = serde_json::to_value(Mood::Named(MoodCategory::Romantic)).unwrap();
        assert_eq!(named, serde_json::json!({ "type": "romantic" }));

        let custom = serde_json::to_value(Mood::Custom("jazz music".into())).unwrap();
        assert_eq!(
            custom,
            serde_json::json!({ "type": "custom", "customValue": "jazz music" })
        );

        let parsed: Mood = serde_json::from_value(custom).unwrap();
        assert_eq!(parsed, Mood::Custom("jazz music".into()));

        let unknown = serde_json::from_value::<Mood>(serde_json::json!({ "type": "bored" }));
        assert!(unknown.is_err());
    }
}
