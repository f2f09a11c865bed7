//! Mood-driven music discovery.
//!
//! Free text such as "calm but energetic" is turned into a [`mood::Mood`]
//! (or a two-mood [`mood::MoodFusion`]), a search phrase is derived from it,
//! and the tracks found for that phrase are cached per mood for 24 hours
//! together with the user's liked tracks.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod feedback;
pub mod finder;
pub mod models;
pub mod mood;

pub use cache::{JsonFileStore, KeyValueStore, MemoryStore, MoodResultCache, StoreError};
pub use catalog::{OfflineCatalog, TrackSearch};
pub use feedback::{FeedbackAction, FeedbackRecorder, UserFeedback};
pub use finder::{Analysis, TrackFinder};
pub use models::Track;
pub use mood::{Intensity, Mood, MoodCategory, MoodFusion};
