use super::clock::{Clock, SystemClock};
use super::store::KeyValueStore;
use crate::models::Track;
use crate::mood::Mood;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Entries older than this read as absent
pub const CACHE_EXPIRATION_HOURS: i64 = 24;

pub fn cache_expiration() -> Duration {
    Duration::hours(CACHE_EXPIRATION_HOURS)
}

/// Track list and capture time for one mood, stored under a single key so
/// the two are always replaced together
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedMoodEntry {
    #[serde(rename = "capturedAt")]
    captured_at: DateTime<Utc>,
    tracks: Vec<Track>,
}

/// Per-mood cache of search results with a separate per-mood liked set.
///
/// Store failures never reach the caller: reads degrade to a miss and
/// writes report `false`, both with a warning logged. Mutations are
/// serialized per mood; different moods never contend.
pub struct MoodResultCache<S: KeyValueStore> {
    store: S,
    clock: Arc<dyn Clock>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: KeyValueStore> MoodResultCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn tracks_key(mood: &Mood) -> String {
        format!("cached_tracks_{}", mood.storage_key())
    }

    fn likes_key(mood: &Mood) -> String {
        format!("liked_tracks_{}", mood.storage_key())
    }

    /// Run `f` holding the lock for `mood`. The lock entry is dropped again
    /// once no caller holds it, so the map only grows with concurrent moods.
    fn with_lock<T>(&self, mood: &Mood, f: impl FnOnce() -> T) -> T {
        let key = mood.storage_key();
        let lock = self.locks.entry(key.clone()).or_default().value().clone();
        let result = {
            let _guard = lock.lock();
            f()
        };
        drop(lock);
        self.locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    /// Replace the entry for `mood` with `tracks`, captured now. The liked set
    /// is left alone. Returns `false` if the store could not be written.
    pub fn cache_tracks(&self, mood: &Mood, tracks: &[Track]) -> bool {
        let entry = CachedMoodEntry {
            captured_at: self.clock.now(),
            tracks: tracks.to_vec(),
        };
        let payload = match serde_json::to_vec(&entry) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Failed to encode tracks for {mood}: {e}");
                return false;
            }
        };

        self.with_lock(mood, || match self.store.set(&Self::tracks_key(mood), &payload) {
            Ok(()) => {
                log::debug!("Cached {} tracks for {mood}", tracks.len());
                true
            }
            Err(e) => {
                log::warn!("Failed to cache tracks for {mood}: {e}");
                false
            }
        })
    }

    /// Cached tracks for `mood` with liked flags taken from the current liked
    /// set, or `None` when absent, expired or unreadable
    pub fn get_cached_tracks(&self, mood: &Mood) -> Option<Vec<Track>> {
        self.with_lock(mood, || self.fresh_tracks_with_likes(mood))
    }

    /// Whether a non-expired entry exists, without decoding likes
    pub fn is_cache_valid(&self, mood: &Mood) -> bool {
        self.with_lock(mood, || {
            self.read_entry(mood)
                .is_some_and(|entry| self.is_fresh(&entry))
        })
    }

    /// Drop the track list for `mood`; its liked set survives
    pub fn clear_cache(&self, mood: &Mood) -> bool {
        self.with_lock(mood, || match self.store.remove(&Self::tracks_key(mood)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to clear cache for {mood}: {e}");
                false
            }
        })
    }

    /// Flip membership of `track_id` in the liked set for `mood`.
    /// Returns `false` if the set could not be read or written.
    pub fn toggle_like(&self, track_id: &str, mood: &Mood) -> bool {
        self.with_lock(mood, || self.toggle_like_locked(track_id, mood))
    }

    fn toggle_like_locked(&self, track_id: &str, mood: &Mood) -> bool {
        let key = Self::likes_key(mood);
        let mut liked = match self.store.string_set(&key) {
            Ok(liked) => liked,
            Err(e) => {
                log::warn!("Failed to read liked tracks for {mood}: {e}");
                return false;
            }
        };

        if !liked.remove(track_id) {
            liked.insert(track_id.to_string());
        }

        match self.store.set_string_set(&key, &liked) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save liked tracks for {mood}: {e}");
                false
            }
        }
    }

    pub fn is_liked(&self, track_id: &str, mood: &Mood) -> bool {
        self.liked_track_ids(mood).contains(track_id)
    }

    /// Liked identifiers for `mood`; empty if unreadable
    pub fn liked_track_ids(&self, mood: &Mood) -> HashSet<String> {
        self.read_likes(mood).unwrap_or_default()
    }

    /// Cached tracks for `mood` that are in its liked set. Empty when the
    /// entry is absent or expired, whatever the liked set holds.
    pub fn get_liked_tracks(&self, mood: &Mood) -> Vec<Track> {
        self.with_lock(mood, || {
            self.fresh_tracks_with_likes(mood)
                .map(|tracks| tracks.into_iter().filter(|track| track.is_liked).collect())
                .unwrap_or_default()
        })
    }

    /// Apply the current liked set for `mood` to freshly fetched tracks
    pub fn overlay_likes(&self, mood: &Mood, tracks: Vec<Track>) -> Vec<Track> {
        match self.read_likes(mood) {
            Some(liked) => Self::apply_likes(tracks, &liked),
            None => tracks,
        }
    }

    fn fresh_tracks_with_likes(&self, mood: &Mood) -> Option<Vec<Track>> {
        let entry = self.read_entry(mood)?;
        if !self.is_fresh(&entry) {
            log::debug!("Cache entry for {mood} expired at read time");
            return None;
        }
        let liked = self.read_likes(mood)?;
        Some(Self::apply_likes(entry.tracks, &liked))
    }

    fn apply_likes(tracks: Vec<Track>, liked: &HashSet<String>) -> Vec<Track> {
        tracks
            .into_iter()
            .map(|track| Track {
                is_liked: liked.contains(&track.id),
                ..track
            })
            .collect()
    }

    fn is_fresh(&self, entry: &CachedMoodEntry) -> bool {
        self.clock.now().signed_duration_since(entry.captured_at) < cache_expiration()
    }

    fn read_entry(&self, mood: &Mood) -> Option<CachedMoodEntry> {
        let payload = match self.store.get(&Self::tracks_key(mood)) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read cached tracks for {mood}: {e}");
                return None;
            }
        };
        match serde_json::from_slice(&payload) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Failed to decode cached tracks for {mood}: {e}");
                None
            }
        }
    }

    fn read_likes(&self, mood: &Mood) -> Option<HashSet<String>> {
        match self.store.string_set(&Self::likes_key(mood)) {
            Ok(liked) => Some(liked),
            Err(e) => {
                log::warn!("Failed to read liked tracks for {mood}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::mood::MoodCategory;

    #[test]
    fn test_lock_entries_are_released() {
        let cache = MoodResultCache::new(MemoryStore::new());
        for i in 0..50 {
            let mood = Mood::Custom(format!("mood {i}"));
            cache.cache_tracks(&mood, &[Track::new("Song", "Artist")]);
            cache.toggle_like("t1", &mood);
            cache.get_liked_tracks(&mood);
        }
        assert!(cache.locks.is_empty());
    }

    #[test]
    fn test_lock_entry_kept_while_held() {
        let cache = MoodResultCache::new(MemoryStore::new());
        let happy = Mood::Named(MoodCategory::Happy);
        let sad = Mood::Named(MoodCategory::Sad);

        cache.with_lock(&happy, || {
            cache.clear_cache(&sad);
            assert!(cache.locks.contains_key("happy"));
            assert!(!cache.locks.contains_key("sad"));
        });
        assert!(cache.locks.is_empty());
    }
}
