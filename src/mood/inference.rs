use super::keywords::{
    GENRE_TERMS, MIN_SCORED_WORD_LEN, SCORING_STOPWORDS, keywords_for,
};
use super::types::{Intensity, Mood, MoodCategory};

/// Keyword-based mood inference using static helper functions.
///
/// Every function here is pure: the same text always yields the same result.
pub struct MoodInference;

impl MoodInference {
    /// Infer a mood and optional intensity from free text.
    ///
    /// Genre mentions win over emotional words; text that matches nothing
    /// comes back verbatim as a custom mood.
    pub fn infer_mood(text: &str) -> (Mood, Option<Intensity>) {
        let lower = text.to_lowercase();
        let intensity = Self::detect_intensity(&lower);

        if let Some(term) = Self::detect_genre(&lower) {
            log::debug!("Genre term '{term}' found, skipping emotional scoring");
            return (Mood::Custom(format!("{term} music")), intensity);
        }

        match Self::best_category(&Self::score_categories(&lower)) {
            Some(category) => (Mood::Named(category), intensity),
            None => (Mood::Custom(text.to_string()), intensity),
        }
    }

    /// First intensity token (in table order) contained in the text
    pub fn detect_intensity(text: &str) -> Option<Intensity> {
        let lower = text.to_lowercase();
        Intensity::ALL
            .into_iter()
            .find(|intensity| lower.contains(intensity.modifier()))
    }

    /// First musical term (in priority order) contained in the text
    pub fn detect_genre(text: &str) -> Option<&'static str> {
        let lower = text.to_lowercase();
        GENRE_TERMS.iter().copied().find(|term| lower.contains(term))
    }

    /// Per-category keyword scores, indexed by [`MoodCategory::index`].
    ///
    /// Each scored word adds at most one point to a category, when it is a
    /// substring of one of the category's keywords or contains one.
    pub fn score_categories(text: &str) -> [u32; 10] {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split_whitespace()
            .map(Self::normalize_word)
            .filter(|word| Self::is_scored_word(word))
            .collect();

        let mut scores = [0u32; 10];
        for word in &words {
            for category in MoodCategory::ALL {
                let hit = keywords_for(category)
                    .iter()
                    .any(|keyword| keyword.contains(word) || word.contains(keyword));
                if hit {
                    scores[category.index()] += 1;
                }
            }
        }
        scores
    }

    /// Category with the strictly highest non-zero score. Ties go to the
    /// category declared first.
    pub fn best_category(scores: &[u32; 10]) -> Option<MoodCategory> {
        let mut best: Option<MoodCategory> = None;
        let mut best_score = 0;
        for category in MoodCategory::ALL {
            let score = scores[category.index()];
            if score > best_score {
                best_score = score;
                best = Some(category);
            }
        }
        best
    }

    fn normalize_word(word: &str) -> &str {
        word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
    }

    fn is_scored_word(word: &str) -> bool {
        word.chars().count() >= MIN_SCORED_WORD_LEN && !SCORING_STOPWORDS.contains(&word)
    }
}
