//! Id generation for new records

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

/// Produces the id assigned to a record at creation.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Millisecond timestamps rendered as decimal strings.
///
/// Ids stay strictly increasing within one generator: when the clock has not
/// moved past the last id handed out, the next id is the last one plus one.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last: Mutex<i64>,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_after(&self, now_ms: i64) -> i64 {
        let mut last = self.last.lock();
        let next = now_ms.max(*last + 1);
        *last = next;
        next
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn generate_id(&self) -> String {
        self.next_after(Utc::now().timestamp_millis()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_are_distinct() {
        let generator = UuidGenerator;
        let ids: HashSet<String> = (0..100).map(|_| generator.generate_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_timestamp_ids_never_collide() {
        let generator = TimestampIdGenerator::new();
        let ids: Vec<i64> = (0..1000)
            .map(|_| generator.generate_id().parse().unwrap())
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_timestamp_follows_clock() {
        let generator = TimestampIdGenerator::new();
        assert_eq!(generator.next_after(1_000), 1_000);
        assert_eq!(generator.next_after(1_000), 1_001);
        assert_eq!(generator.next_after(999), 1_002);
        assert_eq!(generator.next_after(5_000), 5_000);
    }
}
