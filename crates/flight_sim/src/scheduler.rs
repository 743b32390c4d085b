//! System scheduler: priority ordering.
//!
//! The schedule is an explicit list kept sorted as systems are registered:
//! ascending priority, with ties broken by registration order. Systems run
//! one at a time in that order.

use std::sync::Arc;

use crate::system::System;

/// A registered system with its ordering key.
#[derive(Clone)]
pub struct ScheduledSystem {
    /// The system's priority at registration time.
    pub priority: i32,
    /// Registration sequence number, used to break priority ties.
    pub sequence: u64,
    /// The system itself.
    pub system: Arc<dyn System>,
}

/// The ordered list of systems a world runs every tick.
#[derive(Default)]
pub struct SystemSchedule {
    entries: Vec<ScheduledSystem>,
    next_sequence: u64,
}

impl SystemSchedule {
    /// Create a new empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a system after every system whose priority is lower or equal.
    pub fn insert(&mut self, system: Arc<dyn System>) {
        let priority = system.priority();
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let index = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(
            index,
            ScheduledSystem {
                priority,
                sequence,
                system,
            },
        );
    }

    /// Returns the systems in execution order.
    #[must_use]
    pub fn ordered(&self) -> Vec<Arc<dyn System>> {
        self.entries.iter().map(|e| Arc::clone(&e.system)).collect()
    }

    /// Returns the system names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.system.name().to_string())
            .collect()
    }

    /// Iterates the scheduled entries in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledSystem> {
        self.entries.iter()
    }

    /// Number of scheduled systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no system is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for SystemSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.system.name(), e.priority)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::world::World;

    struct Named {
        name: String,
        priority: i32,
    }

    impl System for Named {
        fn name(&self) -> &str {
            &self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn update(&self, _world: &World, _dt: f64) -> Result<(), SimError> {
            Ok(())
        }
    }

    fn make_system(name: &str, priority: i32) -> Arc<dyn System> {
        Arc::new(Named {
            name: name.to_string(),
            priority,
        })
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = SystemSchedule::new();
        assert!(schedule.is_empty());
        assert!(schedule.ordered().is_empty());
    }

    #[test]
    fn test_orders_by_priority() {
        let mut schedule = SystemSchedule::new();
        schedule.insert(make_system("physics", 100));
        schedule.insert(make_system("rocket", 0));
        schedule.insert(make_system("motor", -10));
        assert_eq!(schedule.names(), vec!["motor", "rocket", "physics"]);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let mut schedule = SystemSchedule::new();
        schedule.insert(make_system("a", 0));
        schedule.insert(make_system("b", 1));
        schedule.insert(make_system("c", 0));
        schedule.insert(make_system("d", 0));
        schedule.insert(make_system("e", -1));
        assert_eq!(schedule.names(), vec!["e", "a", "c", "d", "b"]);

        let sequences: Vec<u64> = schedule.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![4, 0, 2, 3, 1]);
    }

    #[test]
    fn test_ordered_matches_names() {
        let mut schedule = SystemSchedule::new();
        schedule.insert(make_system("second", 5));
        schedule.insert(make_system("first", 1));
        let names: Vec<String> = schedule
            .ordered()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, schedule.names());
        assert_eq!(schedule.len(), 2);
    }
}
