//! Column resize tracking.
//!
//! Releasing a resize handle over a header would otherwise register as a sort
//! click. The tracker is an explicit state machine owned by the grid:
//!
//! ```text
//! Idle --begin--> Resizing --end--> Cooldown(until) --time passes--> Idle
//! ```
//!
//! Sort clicks are accepted only in `Idle` (or once the cooldown deadline has
//! passed). Time is always passed in, never read from a clock.

use std::time::Duration;
use std::time::Instant;

/// Narrowest width a drag can produce, in pixels.
pub const MIN_COLUMN_WIDTH: f64 = 50.0;

/// How long sort clicks stay suppressed after a resize ends.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(200);

/// State of the resize tracker.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResizeState {
    /// No resize in progress.
    #[default]
    Idle,
    /// A column edge is being dragged.
    Resizing {
        field: String,
        origin_x: f64,
        origin_width: f64,
    },
    /// A resize just ended; sort clicks are ignored until `until`.
    Cooldown { until: Instant },
}

/// Tracks drag-to-resize of one column at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeTracker {
    state: ResizeState,
    cooldown: Duration,
    min_width: f64,
}

impl Default for ResizeTracker {
    fn default() -> Self {
        Self {
            state: ResizeState::Idle,
            cooldown: DEFAULT_COOLDOWN,
            min_width: MIN_COLUMN_WIDTH,
        }
    }
}

impl ResizeTracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the post-resize cooldown.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Sets the minimum column width.
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width;
        self
    }

    /// Current state.
    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    /// Field being resized, if a drag is in progress.
    pub fn resizing_field(&self) -> Option<&str> {
        match &self.state {
            ResizeState::Resizing { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Starts dragging the edge of `field` from pointer position `x`.
    ///
    /// Replaces any drag or cooldown in progress.
    pub fn begin(&mut self, field: impl Into<String>, x: f64, current_width: f64) {
        let field = field.into();
        log::trace!("resize of '{}' started at x={}", field, x);
        self.state = ResizeState::Resizing {
            field,
            origin_x: x,
            origin_width: current_width,
        };
    }

    /// Moves the pointer to `x`. Returns the column and its new width while a
    /// drag is in progress.
    pub fn drag(&self, x: f64) -> Option<(&str, f64)> {
        match &self.state {
            ResizeState::Resizing {
                field,
                origin_x,
                origin_width,
            } => Some((field, (origin_width + x - origin_x).max(self.min_width))),
            _ => None,
        }
    }

    /// Releases the drag at time `now`, entering the cooldown.
    ///
    /// Does nothing unless a drag is in progress.
    pub fn end(&mut self, now: Instant) {
        if let ResizeState::Resizing { field, .. } = &self.state {
            log::trace!("resize of '{}' ended", field);
            self.state = ResizeState::Cooldown {
                until: now + self.cooldown,
            };
        }
    }

    /// Whether a header click at `now` may sort. Settles an expired cooldown
    /// back to idle.
    pub fn accepts_sort_click(&mut self, now: Instant) -> bool {
        match self.state {
            ResizeState::Idle => true,
            ResizeState::Resizing { .. } => false,
            ResizeState::Cooldown { until } => {
                if now >= until {
                    self.state = ResizeState::Idle;
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_computes_width() {
        let mut tracker = ResizeTracker::new();
        assert_eq!(tracker.drag(10.0), None);
        tracker.begin("name", 100.0, 150.0);
        assert_eq!(tracker.resizing_field(), Some("name"));
        assert_eq!(tracker.drag(130.0), Some(("name", 180.0)));
        assert_eq!(tracker.drag(0.0), Some(("name", MIN_COLUMN_WIDTH)));
    }

    #[test]
    fn test_sort_suppressed_during_and_after_resize() {
        let start = Instant::now();
        let mut tracker = ResizeTracker::new();
        assert!(tracker.accepts_sort_click(start));

        tracker.begin("name", 0.0, 100.0);
        assert!(!tracker.accepts_sort_click(start));

        tracker.end(start);
        assert!(matches!(tracker.state(), ResizeState::Cooldown { .. }));
        assert!(!tracker.accepts_sort_click(start + Duration::from_millis(50)));
        assert!(tracker.accepts_sort_click(start + DEFAULT_COOLDOWN));
        assert_eq!(tracker.state(), &ResizeState::Idle);
    }

    #[test]
    fn test_end_without_drag_is_noop() {
        let mut tracker = ResizeTracker::new();
        tracker.end(Instant::now());
        assert_eq!(tracker.state(), &ResizeState::Idle);
    }
}
