use crate::cache::{KeyValueStore, MoodResultCache};
use crate::catalog::TrackSearch;
use crate::models::Track;
use crate::mood::{Intensity, Mood, MoodFusion, MoodInference, MoodPresentation, SearchTerms};
use anyhow::{Context, Result};

/// Outcome of analysing free text: a two-mood fusion when one is detected,
/// otherwise a single mood
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Single {
        mood: Mood,
        intensity: Option<Intensity>,
    },
    Fusion(MoodFusion),
}

impl Analysis {
    /// Fusion detection runs first; single-mood inference is the fallback
    pub fn of(text: &str) -> Analysis {
        let text = text.trim();
        match MoodFusion::infer(text) {
            Some(fusion) => Analysis::Fusion(fusion),
            None => {
                let (mood, intensity) = MoodInference::infer_mood(text);
                Analysis::Single { mood, intensity }
            }
        }
    }

    /// Mood the results are cached under.
    ///
    /// A single mood is cached under the mood alone, whatever its intensity,
    /// so all intensities of one mood share results and likes and the first
    /// search in a 24 hour window decides the tracks. Fusions are cached as a
    /// custom mood named after their search phrase, which includes the fusion
    /// intensity.
    pub fn cache_mood(&self) -> Mood {
        match self {
            Analysis::Single { mood, .. } => mood.clone(),
            Analysis::Fusion(fusion) => Mood::Custom(fusion.search_term()),
        }
    }

    /// Mood reported in feedback: the single mood or the fusion's primary
    pub fn detected_mood(&self) -> Mood {
        match self {
            Analysis::Single { mood, .. } => mood.clone(),
            Analysis::Fusion(fusion) => Mood::Named(fusion.primary()),
        }
    }

    pub fn search_term(&self) -> String {
        match self {
            Analysis::Single { mood, intensity } => SearchTerms::enhanced(mood, *intensity),
            Analysis::Fusion(fusion) => fusion.search_term(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Analysis::Single {
                mood,
                intensity: Some(intensity),
            } => format!("{} ({intensity})", MoodPresentation::label(mood)),
            Analysis::Single { mood, .. } => MoodPresentation::label(mood),
            Analysis::Fusion(fusion) => format!(
                "{} {}",
                MoodPresentation::fusion_glyphs(fusion),
                fusion.display_name()
            ),
        }
    }
}

/// Finds tracks for analysed text, serving from the cache when it can
pub struct TrackFinder<S: KeyValueStore, C: TrackSearch> {
    cache: MoodResultCache<S>,
    catalog: C,
}

impl<S: KeyValueStore, C: TrackSearch> TrackFinder<S, C> {
    pub fn new(cache: MoodResultCache<S>, catalog: C) -> Self {
        Self { cache, catalog }
    }

    pub fn cache(&self) -> &MoodResultCache<S> {
        &self.cache
    }

    /// Cached tracks when fresh, otherwise a catalog search whose results
    /// are cached before being returned
    pub fn find_tracks(&self, analysis: &Analysis, limit: usize) -> Result<Vec<Track>> {
        let mood = analysis.cache_mood();

        if let Some(tracks) = self.cache.get_cached_tracks(&mood) {
            log::info!("Using {} cached tracks for {mood}", tracks.len());
            return Ok(tracks);
        }

        let term = analysis.search_term();
        log::debug!("Cache miss for {mood}, searching for '{term}'");
        let tracks = self
            .catalog
            .search(&term, limit)
            .with_context(|| format!("Failed to search tracks for '{term}'"))?;

        if !self.cache.cache_tracks(&mood, &tracks) {
            log::warn!("Serving uncached results for {mood}");
        }

        Ok(self.cache.overlay_likes(&mood, tracks))
    }

    /// Drop any cached results for the analysis and search again
    pub fn refresh(&self, analysis: &Analysis, limit: usize) -> Result<Vec<Track>> {
        self.cache.clear_cache(&analysis.cache_mood());
        self.find_tracks(analysis, limit)
    }
}
