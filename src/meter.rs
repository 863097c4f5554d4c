use crate::diff::matched_count;
use crate::util::round2;
use std::time::Instant;

/// A computed metrics snapshot. Recomputed fresh on every tick, frozen once
/// the session finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    pub elapsed_secs: f64,
    pub chars_per_min: f64,
    pub accuracy: f64,
    pub finished: bool,
}

/// tracks one typing session against a reference text
///
/// The host pushes text snapshots in via [`observe`](Meter::observe) and
/// drives recomputation via [`tick`](Meter::tick); the meter never reads the
/// clock itself. The timer starts on the first non-empty typed text and
/// stops when the typed text reaches the reference length, character-wise.
#[derive(Debug)]
pub struct Meter {
    reference: String,
    typed: String,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    reading: Reading,
}

impl Meter {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            typed: String::new(),
            started_at: None,
            ended_at: None,
            reading: Reading::default(),
        }
    }

    /// Record the current typed text. Starts the clock on the first
    /// non-empty snapshot; when the typed length first equals the reference
    /// length the session ends and the final reading is returned. A changed
    /// reference resets the meter and begins a new session in the same
    /// call. Every other outcome is `None`; live readings come from `tick`.
    pub fn observe(&mut self, typed: &str, reference: &str, now: Instant) -> Option<Reading> {
        if reference != self.reference {
            self.reset();
            self.reference = reference.to_string();
        }
        if self.ended_at.is_some() {
            return None;
        }
        if typed != self.typed {
            self.typed = typed.to_string();
        }
        if self.started_at.is_none() && !self.typed.is_empty() {
            self.started_at = Some(now);
        }
        let started_at = self.started_at?;
        if self.typed.chars().count() == self.reference.chars().count() {
            Some(self.finalize(started_at, now))
        } else {
            None
        }
    }

    /// Recompute the live reading. No-op outside the running window
    /// (before the first keystroke, after the session has ended, or while
    /// the typed text is empty).
    pub fn tick(&mut self, now: Instant) -> Option<Reading> {
        let started_at = self.started_at?;
        if self.ended_at.is_some() || self.typed.is_empty() {
            return None;
        }
        let elapsed = now.saturating_duration_since(started_at).as_secs_f64();
        self.reading = self.compute(elapsed, false);
        Some(self.reading)
    }

    /// Clear all session state (start, end, typed text, metrics), keeping
    /// the reference text. Returns the zeroed reading.
    pub fn reset(&mut self) -> Reading {
        self.typed.clear();
        self.started_at = None;
        self.ended_at = None;
        self.reading = Reading::default();
        self.reading
    }

    fn finalize(&mut self, started_at: Instant, now: Instant) -> Reading {
        self.ended_at = Some(now);
        let elapsed = now.saturating_duration_since(started_at).as_secs_f64();
        self.reading = self.compute(elapsed, true);
        self.reading
    }

    // Same formulas for tick and finalize, so a finish reading equals what
    // a tick at that instant would have produced.
    fn compute(&self, elapsed_secs: f64, finished: bool) -> Reading {
        let typed_chars = self.typed.chars().count();
        let reference_chars = self.reference.chars().count();
        let chars_per_min = if elapsed_secs > 0.0 {
            round2(typed_chars as f64 / elapsed_secs * 60.0)
        } else {
            0.0
        };
        let accuracy = if reference_chars > 0 {
            let matched = matched_count(&self.reference, &self.typed);
            round2(matched as f64 / reference_chars as f64 * 100.0)
        } else {
            0.0
        };
        Reading {
            elapsed_secs,
            chars_per_min,
            accuracy,
            finished,
        }
    }

    /// The most recent reading, zeroed until the first tick or finish.
    pub fn reading(&self) -> Reading {
        self.reading
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.ended_at.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.has_started() && !self.has_finished()
    }
}
