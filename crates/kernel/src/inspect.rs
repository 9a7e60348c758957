/// Summary of world state for logs and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSummary {
    pub tick: u64,
    pub entity_count: usize,
    pub joint_count: usize,
    pub highlighted: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} entities={} joints={} highlighted={} pending_events={}",
            self.tick, self.entity_count, self.joint_count, self.highlighted, self.pending_events
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::World;
    use gripspace_common::Transform;
    use gripspace_grip::{Grabbable, GripScene};

    #[test]
    fn summary_empty_world() {
        let summary = World::new().summary();
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.entity_count, 0);
        assert_eq!(summary.joint_count, 0);
    }

    #[test]
    fn summary_counts_highlights() {
        let mut world = World::new();
        let a = world.spawn_grabbable(Transform::default(), Grabbable::default());
        world.spawn_grabbable(Transform::default(), Grabbable::default());
        if let Some(h) = world.highlightable(a) {
            h.highlight(Default::default());
        }
        world.step();

        let summary = world.summary();
        assert_eq!(summary.entity_count, 2);
        assert_eq!(summary.highlighted, 1);
        assert_eq!(summary.pending_events, 3); // 2 spawns + 1 step
    }

    #[test]
    fn summary_display() {
        let s = format!("{}", World::new().summary());
        assert!(s.contains("tick=0"));
        assert!(s.contains("joints=0"));
    }
}
