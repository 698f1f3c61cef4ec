//! Timestamp-derived entity ids.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Hands out ids derived from the current time in milliseconds.
///
/// Ids are strictly increasing for the lifetime of the generator, so two
/// entities created within the same millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce an id that is not in `taken`.
    pub fn next_id<'a>(&self, taken: impl IntoIterator<Item = &'a str> + Clone) -> String {
        let mut candidate = self.reserve(Utc::now().timestamp_millis());
        loop {
            let rendered = candidate.to_string();
            if !taken.clone().into_iter().any(|id| id == rendered) {
                return rendered;
            }
            candidate = self.reserve(candidate + 1);
        }
    }

    /// Claim a value at least `floor` and above anything handed out so far.
    fn reserve(&self, floor: i64) -> i64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let next = floor.max(current + 1);
            match self
                .last
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let ids = IdGenerator::new();
        let a: i64 = ids.next_id(std::iter::empty::<&str>()).parse().unwrap();
        let b: i64 = ids.next_id(std::iter::empty::<&str>()).parse().unwrap();
        let c: i64 = ids.next_id(std::iter::empty::<&str>()).parse().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_ids_skip_taken_values() {
        let ids = IdGenerator::new();
        let first = ids.next_id(std::iter::empty::<&str>());
        let following: i64 = first.parse::<i64>().unwrap() + 1;
        let taken = [following.to_string(), (following + 1).to_string()];

        let next = ids.next_id(taken.iter().map(String::as_str));
        assert!(!taken.contains(&next));
        assert!(next.parse::<i64>().unwrap() > following + 1);
    }

    #[test]
    fn test_ids_are_timestamp_derived() {
        let before = Utc::now().timestamp_millis();
        let id: i64 = IdGenerator::new()
            .next_id(std::iter::empty::<&str>())
            .parse()
            .unwrap();
        assert!(id >= before);
    }
}
