//! # Visibility Trigger
//!
//! Decides when a lazily loaded element (an image, the "load more" row)
//! should start loading, given the visible ratio reported by the host's
//! intersection observer.

/// Fires when the observed visible ratio reaches `threshold`.
///
/// With `once = true` (the default for lazy loading) the trigger latches
/// after the first firing and ignores later observations.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f64,
    once: bool,
    fired: bool,
    visible: bool,
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        VisibilityTrigger::new(0.1, true)
    }
}

impl VisibilityTrigger {
    /// `threshold` is clamped into `[0, 1]`; NaN behaves as `0`.
    pub fn new(threshold: f64, once: bool) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        VisibilityTrigger {
            threshold,
            once,
            fired: false,
            visible: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Whether the last observation counted as visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feeds one observation and returns `true` when the caller should
    /// load now.
    ///
    /// A ratio of `0` never counts as visible, even with a `0` threshold.
    /// Repeating trigger: fires on each transition from hidden to visible.
    pub fn observe(&mut self, ratio: f64) -> bool {
        if self.once && self.fired {
            return false;
        }

        let now_visible = ratio.is_finite() && ratio > 0.0 && ratio >= self.threshold;
        let entering = now_visible && !self.visible;
        self.visible = now_visible;

        if entering {
            self.fired = true;
        }
        entering
    }

    /// Re-arms the trigger (e.g. after the list was replaced).
    pub fn reset(&mut self) {
        self.fired = false;
        self.visible = false;
    }
}
