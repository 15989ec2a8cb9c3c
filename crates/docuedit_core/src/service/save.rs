//! Debounced save scheduling.
//!
//! # Responsibility
//! - Collapse bursts of edit events into one save after a quiet period.
//! - Track the display save state and the last-saved timestamp.
//!
//! # Invariants
//! - Body and title edits debounce independently but share one save.
//! - A new edit on a channel always replaces that channel's deadline.
//! - Time is passed in by the caller; this module never reads the clock.

use std::time::{Duration, Instant};

/// Quiet period after a body edit before an auto-save fires.
pub const BODY_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Quiet period after a title edit before an auto-save fires.
pub const TITLE_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Display-only save state; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Unsaved edits exist (a debounce deadline is pending).
    Dirty,
    /// A save is being written.
    Saving,
    /// Everything is persisted.
    Saved,
}

impl SaveState {
    /// Status line text shown next to the document title.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dirty | Self::Saving => "Saving...",
            Self::Saved => "All changes saved",
        }
    }
}

#[derive(Debug)]
struct DebounceChannel {
    window: Duration,
    deadline: Option<Instant>,
}

impl DebounceChannel {
    fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    fn note(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    fn due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if deadline <= now)
    }

    fn clear(&mut self) {
        self.deadline = None;
    }
}

/// Two-channel debounce over one underlying save routine.
#[derive(Debug)]
pub struct SaveScheduler {
    body: DebounceChannel,
    title: DebounceChannel,
    state: SaveState,
    last_saved_at: Instant,
}

impl SaveScheduler {
    /// Creates an idle scheduler; `now` seeds the last-saved stamp.
    pub fn new(now: Instant) -> Self {
        Self {
            body: DebounceChannel::new(BODY_DEBOUNCE),
            title: DebounceChannel::new(TITLE_DEBOUNCE),
            state: SaveState::Saved,
            last_saved_at: now,
        }
    }

    /// Records a body edit: marks dirty, (re)arms the body deadline.
    pub fn note_body_edit(&mut self, now: Instant) {
        self.body.note(now);
        self.state = SaveState::Dirty;
    }

    /// Records a title edit: marks dirty, (re)arms the title deadline.
    pub fn note_title_edit(&mut self, now: Instant) {
        self.title.note(now);
        self.state = SaveState::Dirty;
    }

    /// Whether any debounce deadline has passed.
    pub fn save_due(&self, now: Instant) -> bool {
        self.body.due(now) || self.title.due(now)
    }

    /// Marks the start of a save; clears both deadlines.
    pub fn begin_save(&mut self) {
        self.body.clear();
        self.title.clear();
        self.state = SaveState::Saving;
    }

    /// Marks a successful save.
    pub fn complete_save(&mut self, now: Instant) {
        self.state = SaveState::Saved;
        self.last_saved_at = now;
    }

    /// Marks a failed save; edits stay dirty so the next tick retries.
    pub fn fail_save(&mut self, now: Instant) {
        self.state = SaveState::Dirty;
        self.body.note(now);
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn status_label(&self) -> &'static str {
        self.state.label()
    }

    /// Relative "last edited" display text, recomputed on host ticks.
    pub fn last_saved_label(&self, now: Instant) -> String {
        let elapsed = now.saturating_duration_since(self.last_saved_at);
        let secs = elapsed.as_secs();
        if secs < 60 {
            "Just now".to_string()
        } else if secs < 3600 {
            format!("{} minutes ago", secs / 60)
        } else {
            format!("{} hours ago", secs / 3600)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SaveScheduler, SaveState, BODY_DEBOUNCE, TITLE_DEBOUNCE};
    use std::time::{Duration, Instant};

    #[test]
    fn body_edit_fires_after_quiet_window() {
        let t0 = Instant::now();
        let mut scheduler = SaveScheduler::new(t0);

        scheduler.note_body_edit(t0);

        assert!(!scheduler.save_due(t0 + BODY_DEBOUNCE - Duration::from_millis(1)));
        assert!(scheduler.save_due(t0 + BODY_DEBOUNCE));
    }

    #[test]
    fn title_channel_uses_shorter_window() {
        let t0 = Instant::now();
        let mut scheduler = SaveScheduler::new(t0);

        scheduler.note_title_edit(t0);

        assert!(!scheduler.save_due(t0 + TITLE_DEBOUNCE - Duration::from_millis(1)));
        assert!(scheduler.save_due(t0 + TITLE_DEBOUNCE));
    }

    #[test]
    fn repeated_edits_reset_the_deadline() {
        let t0 = Instant::now();
        let mut scheduler = SaveScheduler::new(t0);

        scheduler.note_body_edit(t0);
        let t1 = t0 + Duration::from_millis(1500);
        scheduler.note_body_edit(t1);

        assert!(!scheduler.save_due(t0 + BODY_DEBOUNCE));
        assert!(scheduler.save_due(t1 + BODY_DEBOUNCE));
    }

    #[test]
    fn save_lifecycle_transitions_state_and_labels() {
        let t0 = Instant::now();
        let mut scheduler = SaveScheduler::new(t0);
        assert_eq!(scheduler.state(), SaveState::Saved);
        assert_eq!(scheduler.status_label(), "All changes saved");

        scheduler.note_body_edit(t0);
        assert_eq!(scheduler.state(), SaveState::Dirty);
        assert_eq!(scheduler.status_label(), "Saving...");

        scheduler.begin_save();
        assert_eq!(scheduler.state(), SaveState::Saving);
        assert!(!scheduler.save_due(t0 + BODY_DEBOUNCE));

        scheduler.complete_save(t0 + Duration::from_millis(10));
        assert_eq!(scheduler.state(), SaveState::Saved);
        assert_eq!(scheduler.status_label(), "All changes saved");
    }

    #[test]
    fn failed_save_stays_dirty_and_rearms() {
        let t0 = Instant::now();
        let mut scheduler = SaveScheduler::new(t0);

        scheduler.note_body_edit(t0);
        scheduler.begin_save();
        scheduler.fail_save(t0 + Duration::from_millis(5));

        assert_eq!(scheduler.state(), SaveState::Dirty);
        assert!(scheduler.save_due(t0 + Duration::from_millis(5) + BODY_DEBOUNCE));
    }

    #[test]
    fn last_saved_label_buckets_by_elapsed_time() {
        let t0 = Instant::now();
        let scheduler = SaveScheduler::new(t0);

        assert_eq!(scheduler.last_saved_label(t0 + Duration::from_secs(5)), "Just now");
        assert_eq!(
            scheduler.last_saved_label(t0 + Duration::from_secs(180)),
            "3 minutes ago"
        );
        assert_eq!(
            scheduler.last_saved_label(t0 + Duration::from_secs(2 * 3600 + 30)),
            "2 hours ago"
        );
    }
}
