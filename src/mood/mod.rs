pub mod fusion;
pub mod inference;
pub mod keywords;
pub mod presentation;
pub mod search_terms;
pub mod types;


pub use fusion::*;
pub use inference::*;
pub use presentation::*;
pub use search_terms::*;
pub use types::*;

/// Infer a single mood and optional intensity from free text
pub fn infer_mood(text: &str) -> (Mood, Option<Intensity>) {
    MoodInference::infer_mood(text)
}

/// Infer a two-mood fusion from free text, if the text describes one
pub fn infer_fusion(text: &str) -> Option<MoodFusion> {
    MoodFusion::infer(text)
}
