//! Order number issuance.

use crate::model::OrderNumber;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out order numbers 1, 2, 3, ... with no gaps or repeats, from any thread.
#[derive(Debug)]
pub struct OrderNumberGenerator {
    next: AtomicU64,
}

impl OrderNumberGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Starts numbering at `first`, e.g. to continue after a restart.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next(&self) -> OrderNumber {
        OrderNumber(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for OrderNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_sequential_from_one() {
        let numbers = OrderNumberGenerator::new();
        assert_eq!(numbers.next(), OrderNumber(1));
        assert_eq!(numbers.next(), OrderNumber(2));
        assert_eq!(numbers.next(), OrderNumber(3));
    }

    #[test]
    fn test_custom_start() {
        let numbers = OrderNumberGenerator::starting_at(100);
        assert_eq!(numbers.next(), OrderNumber(100));
    }

    #[test]
    fn test_concurrent_callers_get_distinct_gapless_numbers() {
        let numbers = Arc::new(OrderNumberGenerator::new());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let numbers = numbers.clone();
                std::thread::spawn(move || (0..250).map(|_| numbers.next().0).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for t in threads {
            for n in t.join().unwrap() {
                assert!(seen.insert(n), "duplicate order number {}", n);
            }
        }

        assert_eq!(seen.len(), 2000);
        assert_eq!(seen.iter().min(), Some(&1));
        assert_eq!(seen.iter().max(), Some(&2000));
    }
}
