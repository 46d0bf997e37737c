//! Debounced guide redraws driven by parameter edits
//!
//! Every edit schedules a redraw unless one is already pending inside the
//! debounce window. The redraw only happens while guide mode is on and only if
//! the text differs from what was last drawn.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct PendingRedraw {
    text: String,
    due: Instant,
}

/// Tracks parameter edits and decides when the guide needs redrawing
#[derive(Debug, Clone)]
pub struct GuideRefresh {
    window: Duration,
    pending: Option<PendingRedraw>,
    last_drawn: Option<String>,
}

impl GuideRefresh {
    /// Create a refresh tracker with the given debounce window
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_drawn: None,
        }
    }

    /// Record an edit made at `now`
    ///
    /// An edit inside an already pending window replaces the text but keeps
    /// the original deadline.
    pub fn edit(&mut self, text: &str, now: Instant) {
        match self.pending.as_mut() {
            Some(pending) => text.clone_into(&mut pending.text),
            None => {
                self.pending = Some(PendingRedraw {
                    text: text.to_string(),
                    due: now + self.window,
                });
            }
        }
    }

    /// Whether an edit is waiting for its window to elapse
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Return the text to redraw if the pending edit is due
    ///
    /// While guide mode is off nothing is returned and the pending edit is
    /// kept for later. A due edit whose text matches the last drawn text is
    /// consumed without a redraw.
    pub fn due(&mut self, now: Instant, guide_mode: bool) -> Option<String> {
        if !guide_mode {
            return None;
        }

        let is_due = self.pending.as_ref().is_some_and(|p| p.due <= now);
        if !is_due {
            return None;
        }

        let pending = self.pending.take()?;
        if self.last_drawn.as_deref() == Some(pending.text.as_str()) {
            return None;
        }

        self.last_drawn = Some(pending.text.clone());
        Some(pending.text)
    }

    /// Record that the guide was drawn for `text` outside the debounce path
    pub fn mark_drawn(&mut self, text: &str) {
        self.last_drawn = Some(text.to_string());
    }

    /// Forget the last drawn text so the next due edit always redraws
    pub fn force(&mut self) {
        self.last_drawn = None;
    }
}
