use super::types::MoodCategory;

/// Musical terms that short-circuit emotional scoring, in priority order.
/// A match produces a custom mood of `"<term> music"`.
pub const GENRE_TERMS: &[&str] = &[
    "jazz",
    "acoustic",
    "lofi",
    "lo-fi",
    "classical",
    "piano",
    "blues",
    "rock",
    "metal",
    "hip hop",
    "hip-hop",
    "country",
    "folk",
    "electronic",
    "edm",
    "indie",
    "ambient",
    "reggae",
    "r&b",
    "funk",
    "punk",
];

/// Words that separate the two halves of a mixed mood, in priority order
pub const FUSION_CONNECTORS: &[&str] = &[
    "but", "and", "with", "while", "yet", "however", "though", "although",
];

/// Emphasis words that make a fusion strong
pub const STRONG_MARKERS: &[&str] = &["very", "really", "extremely"];

/// Softening words that make a fusion subtle
pub const SUBTLE_MARKERS: &[&str] = &["slightly", "kind of", "a bit"];

/// Words shorter than this never take part in keyword scoring
pub const MIN_SCORED_WORD_LEN: usize = 3;

/// Filler words skipped during keyword scoring. Partial matching is
/// bidirectional, so without this list words like "and" or "feel" would
/// land inside unrelated keywords.
pub const SCORING_STOPWORDS: &[&str] = &[
    "and", "but", "the", "are", "was", "for", "you", "with", "while", "yet",
    "however", "though", "although", "feel", "feels", "feeling", "felt", "very",
    "really", "extremely", "slightly", "kind", "bit", "just", "that", "this",
    "like", "some", "much", "too", "get", "got", "i'm", "its", "it's", "all",
    "not", "have", "been", "today", "now", "right",
];

/// Keywords scored for each category
pub fn keywords_for(category: MoodCategory) -> &'static [&'static str] {
    match category {
        MoodCategory::Happy => &[
            "happy", "joy", "joyful", "cheerful", "glad", "delighted", "smile",
            "sunny", "good", "great", "wonderful", "blessed",
        ],
        MoodCategory::Sad => &[
            "sad", "down", "blue", "depressed", "cry", "crying", "tears",
            "lonely", "heartbroken", "grief", "upset", "miserable",
        ],
        MoodCategory::Angry => &[
            "angry", "mad", "furious", "rage", "hate", "pissed", "livid",
            "enraged", "hostile", "outraged",
        ],
        MoodCategory::Frustrated => &[
            "frustrated", "annoyed", "irritated", "stuck", "stressed",
            "overwhelmed", "fed", "ugh", "exasperated",
        ],
        MoodCategory::Energetic => &[
            "energetic", "energy", "workout", "active", "power", "motivated",
            "strong", "gym", "run", "running", "dance",
        ],
        MoodCategory::Calm => &[
            "calm", "relaxed", "relaxing", "relax", "peaceful", "peace", "chill",
            "serene", "tranquil", "quiet", "mellow", "zen", "soothing",
        ],
        MoodCategory::Nostalgic => &[
            "nostalgic", "nostalgia", "memories", "memory", "remember", "past",
            "childhood", "throwback", "retro", "vintage", "reminisce",
        ],
        MoodCategory::Romantic => &[
            "romantic", "romance", "love", "loving", "crush", "date", "passion",
            "intimate", "sweetheart", "affection",
        ],
        MoodCategory::Melancholic => &[
            "melancholic", "melancholy", "wistful", "bittersweet", "pensive",
            "gloomy", "somber", "moody", "reflective", "introspective", "longing",
        ],
        MoodCategory::Excited => &[
            "excited", "exciting", "thrilled", "hyped", "hype", "ecstatic",
            "pumped", "party", "stoked", "eager",
        ],
    }
}
