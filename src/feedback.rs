use crate::cache::{Clock, KeyValueStore, SystemClock};
use crate::mood::Mood;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Store key holding the whole feedback log
pub const FEEDBACK_KEY: &str = "user_feedback_data";

/// Oldest events are dropped once the log grows past this
pub const MAX_FEEDBACK_EVENTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackAction {
    MoodCorrected,
    SearchAgain,
    ResultsNotGood,
    MoodAccepted,
}

/// One user reaction to a detected mood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFeedback {
    pub id: String,
    pub original_input: String,
    pub detected_mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_mood: Option<Mood>,
    pub user_action: FeedbackAction,
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
}

impl UserFeedback {
    pub fn new(
        original_input: impl Into<String>,
        detected_mood: Mood,
        corrected_mood: Option<Mood>,
        user_action: FeedbackAction,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            original_input: original_input.into(),
            detected_mood,
            corrected_mood,
            user_action,
            timestamp: Utc::now(),
            session_id: session_id.into(),
        }
    }
}

/// Aggregate view over the feedback log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackInsights {
    pub total_sessions: usize,
    pub corrections_count: usize,
    pub search_again_count: usize,
    pub not_good_count: usize,
    pub accepted_count: usize,
    /// Accepted moods per session, as a percentage
    pub accuracy_rate: f64,
}

pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Append-only feedback log kept as one JSON array in a [`KeyValueStore`]
pub struct FeedbackRecorder<S: KeyValueStore> {
    store: S,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> FeedbackRecorder<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Append an event, keeping only the newest [`MAX_FEEDBACK_EVENTS`].
    /// Returns `false` without writing if the existing log cannot be read,
    /// and `false` if the log could not be saved.
    pub fn record(&self, feedback: UserFeedback) -> bool {
        let _guard = self.write_lock.lock();

        let action = feedback.user_action;
        let input = feedback.original_input.clone();

        let Some(mut events) = self.read_events() else {
            log::warn!("Not recording {action:?} feedback over an unreadable log");
            return false;
        };
        events.push(feedback);
        if events.len() > MAX_FEEDBACK_EVENTS {
            let excess = events.len() - MAX_FEEDBACK_EVENTS;
            events.drain(..excess);
        }

        let saved = self.save(&events);
        if saved {
            log::info!("Recorded feedback: {action:?} for input '{input}'");
        }
        saved
    }

    pub fn record_mood_corrected(
        &self,
        original_input: &str,
        detected_mood: Mood,
        corrected_mood: Mood,
        session_id: &str,
    ) -> bool {
        self.record_action(
            original_input,
            detected_mood,
            Some(corrected_mood),
            FeedbackAction::MoodCorrected,
            session_id,
        )
    }

    pub fn record_search_again(&self, original_input: &str, detected_mood: Mood, session_id: &str) -> bool {
        self.record_action(original_input, detected_mood, None, FeedbackAction::SearchAgain, session_id)
    }

    /// Only logs the complaint; cached results are left as they are
    pub fn record_results_not_good(&self, original_input: &str, detected_mood: Mood, session_id: &str) -> bool {
        self.record_action(original_input, detected_mood, None, FeedbackAction::ResultsNotGood, session_id)
    }

    pub fn record_mood_accepted(&self, original_input: &str, detected_mood: Mood, session_id: &str) -> bool {
        self.record_action(original_input, detected_mood, None, FeedbackAction::MoodAccepted, session_id)
    }

    fn record_action(
        &self,
        original_input: &str,
        detected_mood: Mood,
        corrected_mood: Option<Mood>,
        action: FeedbackAction,
        session_id: &str,
    ) -> bool {
        let mut feedback = UserFeedback::new(original_input, detected_mood, corrected_mood, action, session_id);
        feedback.timestamp = self.clock.now();
        self.record(feedback)
    }

    /// Every stored event, oldest first. An unreadable log reads as empty.
    pub fn all_feedback(&self) -> Vec<UserFeedback> {
        self.read_events().unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.all_feedback().len()
    }

    /// Pretty-printed JSON array of every event
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.all_feedback()).context("Failed to export feedback")
    }

    /// Count of corrections keyed by "Detected → Corrected"
    pub fn mood_correction_stats(&self) -> BTreeMap<String, usize> {
        let mut stats = BTreeMap::new();
        for feedback in self
            .all_feedback()
            .into_iter()
            .filter(|f| f.user_action == FeedbackAction::MoodCorrected)
        {
            let corrected = feedback
                .corrected_mood
                .map_or_else(|| "Unknown".to_string(), |mood| mood.to_string());
            *stats
                .entry(format!("{} → {corrected}", feedback.detected_mood))
                .or_insert(0) += 1;
        }
        stats
    }

    pub fn insights(&self) -> FeedbackInsights {
        let events = self.all_feedback();
        let count_of = |action: FeedbackAction| events.iter().filter(|f| f.user_action == action).count();

        let total_sessions = events
            .iter()
            .map(|f| f.session_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let accepted_count = count_of(FeedbackAction::MoodAccepted);
        let accuracy_rate = if total_sessions > 0 {
            accepted_count as f64 / total_sessions as f64 * 100.0
        } else {
            0.0
        };

        FeedbackInsights {
            total_sessions,
            corrections_count: count_of(FeedbackAction::MoodCorrected),
            search_again_count: count_of(FeedbackAction::SearchAgain),
            not_good_count: count_of(FeedbackAction::ResultsNotGood),
            accepted_count,
            accuracy_rate,
        }
    }

    pub fn clear_all(&self) -> bool {
        let _guard = self.write_lock.lock();
        match self.store.remove(FEEDBACK_KEY) {
            Ok(()) => {
                log::info!("Cleared all feedback data");
                true
            }
            Err(e) => {
                log::warn!("Failed to clear feedback data: {e}");
                false
            }
        }
    }

    /// Stored events, or `None` when the log exists but cannot be read
    fn read_events(&self) -> Option<Vec<UserFeedback>> {
        let payload = match self.store.get(FEEDBACK_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Some(Vec::new()),
            Err(e) => {
                log::warn!("Failed to read feedback data: {e}");
                return None;
            }
        };
        match serde_json::from_slice(&payload) {
            Ok(events) => Some(events),
            Err(e) => {
                log::warn!("Failed to decode feedback data: {e}");
                None
            }
        }
    }

    fn save(&self, events: &[UserFeedback]) -> bool {
        let payload = match serde_json::to_vec(events) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Failed to encode feedback: {e}");
                return false;
            }
        };
        match self.store.set(FEEDBACK_KEY, &payload) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save feedback: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemoryStore, MockKeyValueStore, StoreError};
    use crate::mood::MoodCategory;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn create_recorder() -> FeedbackRecorder<MemoryStore> {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()));
        FeedbackRecorder::with_clock(MemoryStore::new(), clock)
    }

    fn named(category: MoodCategory) -> Mood {
        Mood::Named(category)
    }

    #[test]
    fn test_record_and_read_back() {
        let recorder = create_recorder();
        assert!(recorder.record_mood_accepted("so happy", named(MoodCategory::Happy), "s1"));

        let events = recorder.all_feedback();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].user_action, FeedbackAction::MoodAccepted);
        assert_eq!(events[0].original_input, "so happy");
        assert_eq!(events[0].session_id, "s1");
        assert_eq!(events[0].timestamp, Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap());
        assert!(events[0].corrected_mood.is_none());
    }

    #[test]
    fn test_log_keeps_newest_events() {
        let recorder = create_recorder();
        for i in 0..(MAX_FEEDBACK_EVENTS + 5) {
            recorder.record_search_again(&format!("input {i}"), named(MoodCategory::Sad), "s1");
        }

        let events = recorder.all_feedback();
        assert_eq!(events.len(), MAX_FEEDBACK_EVENTS);
        assert_eq!(events[0].original_input, "input 5");
        assert_eq!(
            events.last().map(|f| f.original_input.as_str()),
            Some("input 1004")
        );
    }

    #[test]
    fn test_wire_format() {
        let recorder = create_recorder();
        recorder.record_mood_corrected(
            "blue day",
            named(MoodCategory::Happy),
            Mood::Custom("lofi".to_string()),
            "s1",
        );

        let exported = recorder.export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
        let event = &value[0];
        assert_eq!(event["userAction"], "mood_corrected");
        assert_eq!(event["originalInput"], "blue day");
        assert_eq!(event["detectedMood"]["type"], "happy");
        assert_eq!(event["correctedMood"]["type"], "custom");
        assert_eq!(event["correctedMood"]["customValue"], "lofi");
        assert_eq!(event["timestamp"], "2025-03-01T09:30:00Z");
        assert!(exported.contains('\n'));
    }

    #[test]
    fn test_mood_correction_stats() {
        let recorder = create_recorder();
        recorder.record_mood_corrected("a", named(MoodCategory::Happy), named(MoodCategory::Sad), "s1");
        recorder.record_mood_corrected("b", named(MoodCategory::Happy), named(MoodCategory::Sad), "s2");
        recorder.record_mood_corrected("c", named(MoodCategory::Calm), named(MoodCategory::Romantic), "s3");
        recorder.record_search_again("d", named(MoodCategory::Happy), "s4");

        // Hand-written event without a correction
        recorder.record(UserFeedback::new(
            "e",
            named(MoodCategory::Angry),
            None,
            FeedbackAction::MoodCorrected,
            "s5",
        ));

        let stats = recorder.mood_correction_stats();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats["Happy → Sad"], 2);
        assert_eq!(stats["Calm → Romantic"], 1);
        assert_eq!(stats["Angry → Unknown"], 1);
    }

    #[test]
    fn test_insights() {
        let recorder = create_recorder();
        recorder.record_mood_accepted("a", named(MoodCategory::Happy), "s1");
        recorder.record_search_again("b", named(MoodCategory::Sad), "s2");
        recorder.record_mood_accepted("b", named(MoodCategory::Sad), "s2");
        recorder.record_results_not_good("c", named(MoodCategory::Calm), "s3");
        recorder.record_mood_corrected("c", named(MoodCategory::Calm), named(MoodCategory::Sad), "s3");

        let insights = recorder.insights();
        assert_eq!(insights.total_sessions, 3);
        assert_eq!(insights.accepted_count, 2);
        assert_eq!(insights.search_again_count, 1);
        assert_eq!(insights.not_good_count, 1);
        assert_eq!(insights.corrections_count, 1);
        assert_relative_eq!(insights.accuracy_rate, 200.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_insights_without_feedback() {
        let insights = create_recorder().insights();
        assert_eq!(insights.total_sessions, 0);
        assert_relative_eq!(insights.accuracy_rate, 0.0);
    }

    #[test]
    fn test_clear_all() {
        let recorder = create_recorder();
        recorder.record_mood_accepted("a", named(MoodCategory::Happy), "s1");
        assert_eq!(recorder.count(), 1);
        assert!(recorder.clear_all());
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_corrupt_log_reads_as_empty() {
        let recorder = create_recorder();
        recorder.store.set(FEEDBACK_KEY, b"{broken").unwrap();
        assert!(recorder.all_feedback().is_empty());
        assert_eq!(recorder.insights(), FeedbackInsights::default());
    }

    #[test]
    fn test_save_failure_reports_false() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(StoreError::Unavailable("read-only".to_string())));
        let recorder = FeedbackRecorder::new(store);

        assert!(!recorder.record_mood_accepted("a", named(MoodCategory::Happy), "s1"));
    }

    #[test]
    fn test_unreadable_log_is_not_overwritten() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(StoreError::Unavailable("disk gone".to_string())));
        store.expect_set().never();
        let recorder = FeedbackRecorder::new(store);

        assert!(!recorder.record_mood_accepted("a", named(MoodCategory::Happy), "s1"));
    }

    #[test]
    fn test_corrupt_log_is_kept_until_cleared() {
        let recorder = create_recorder();
        recorder.store.set(FEEDBACK_KEY, b"{broken").unwrap();

        assert!(!recorder.record_search_again("a", named(MoodCategory::Sad), "s1"));
        assert_eq!(recorder.store.get(FEEDBACK_KEY).unwrap(), Some(b"{broken".to_vec()));

        assert!(recorder.clear_all());
        assert!(recorder.record_search_again("a", named(MoodCategory::Sad), "s1"));
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }
}
