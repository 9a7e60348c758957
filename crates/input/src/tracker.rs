use std::collections::BTreeMap;

use crate::InputSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ButtonLevel {
    previous: bool,
    current: bool,
}

/// Turns raw per-frame button levels into edge and level queries.
///
/// Call [`ButtonTracker::set`] for every bound action each frame, then
/// [`ButtonTracker::end_frame`] once the frame's consumers have read it.
/// Unreported actions keep their level from the previous frame.
#[derive(Debug, Clone, Default)]
pub struct ButtonTracker {
    buttons: BTreeMap<String, ButtonLevel>,
}

impl ButtonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the raw level of `action` for the current frame.
    pub fn set(&mut self, action: &str, down: bool) {
        let level = self.buttons.entry(action.to_string()).or_default();
        if level.current != down {
            tracing::trace!(action, down, "button level changed");
        }
        level.current = down;
    }

    /// Latch the current levels as the baseline for the next frame's edges.
    pub fn end_frame(&mut self) {
        for level in self.buttons.values_mut() {
            level.previous = level.current;
        }
    }

    /// Forget every action; all read as up with no edges.
    pub fn clear(&mut self) {
        self.buttons.clear();
    }

    fn level(&self, action: &str) -> ButtonLevel {
        self.buttons.get(action).copied().unwrap_or_default()
    }
}

impl InputSource for ButtonTracker {
    fn pressed(&self, action: &str) -> bool {
        let level = self.level(action);
        level.current && !level.previous
    }

    fn released(&self, action: &str) -> bool {
        let level = self.level(action);
        !level.current && level.previous
    }

    fn holding(&self, action: &str) -> bool {
        self.level(action).current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_action_reads_idle() {
        let t = ButtonTracker::new();
        assert!(!t.pressed("grab"));
        assert!(!t.released("grab"));
        assert!(!t.holding("grab"));
    }

    #[test]
    fn press_edge_lasts_one_frame() {
        let mut t = ButtonTracker::new();
        t.set("grab", true);
        assert!(t.pressed("grab"));
        assert!(t.holding("grab"));
        t.end_frame();

        t.set("grab", true);
        assert!(!t.pressed("grab"));
        assert!(t.holding("grab"));
    }

    #[test]
    fn release_edge_lasts_one_frame() {
        let mut t = ButtonTracker::new();
        t.set("grab", true);
        t.end_frame();
        t.set("grab", false);
        assert!(t.released("grab"));
        assert!(!t.holding("grab"));
        t.end_frame();
        assert!(!t.released("grab"));
    }

    #[test]
    fn unreported_action_keeps_level() {
        let mut t = ButtonTracker::new();
        t.set("interact", true);
        t.end_frame();
        assert!(t.holding("interact"));
        assert!(!t.pressed("interact"));
    }

    #[test]
    fn actions_are_independent() {
        let mut t = ButtonTracker::new();
        t.set("grab", true);
        t.set("interact", false);
        assert!(t.pressed("grab"));
        assert!(!t.pressed("interact"));
    }

    #[test]
    fn clear_resets_everything() {
        let mut t = ButtonTracker::new();
        t.set("grab", true);
        t.clear();
        assert!(!t.holding("grab"));
    }

    #[test]
    fn usable_as_trait_object() {
        let mut t = ButtonTracker::new();
        t.set("grab", true);
        let source: &dyn InputSource = &t;
        assert!(source.pressed("grab"));
    }
}
