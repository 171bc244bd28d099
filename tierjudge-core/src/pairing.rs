/// Comparison scheduling: every unordered pair of a tier's items, served one
/// at a time in a fixed order.
///
/// Public functions work with `Item`s and `Comparison`s. The enumeration
/// itself runs on `usize` positions.
use std::sync::Arc;

use crate::types::{Comparison, IndexedPair, Item};

/// Number of comparisons an exhaustive schedule needs for `num_items` items.
pub fn total_comparisons(num_items: usize) -> usize {
    num_items * num_items.saturating_sub(1) / 2
}

/// Every unordered pair of `items`, each exactly once.
///
/// Order is `(0,1), (0,2), .., (0,n-1), (1,2), ..`, so the same input always
/// yields the same schedule.
pub fn generate_exhaustive_pairings(items: &[Item]) -> Vec<Comparison> {
    generate_exhaustive_pairings_indexed(items.len())
        .into_iter()
        .map(|(a, b)| Comparison {
            item1: items[a].clone(),
            item2: items[b].clone(),
        })
        .collect()
}

pub(crate) fn generate_exhaustive_pairings_indexed(num_items: usize) -> Vec<IndexedPair> {
    let mut pairs = Vec::with_capacity(total_comparisons(num_items));
    for i in 0..num_items {
        for j in (i + 1)..num_items {
            pairs.push((i, j));
        }
    }
    pairs
}

/// The comparison queue of one ranking session.
///
/// Cheap to clone: the pairs are shared and only the cursor moves, so every
/// `advance` produces a new snapshot without copying the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pairs: Arc<[Comparison]>,
    /// Index of the comparison currently being served.
    cursor: usize,
}

impl Schedule {
    /// Build the full schedule for `items`.
    ///
    /// Fewer than two items gives an empty schedule that is already finished.
    pub fn start(items: &[Item]) -> Self {
        Schedule {
            pairs: generate_exhaustive_pairings(items).into(),
            cursor: 0,
        }
    }

    /// Comparison currently being served, `None` once finished.
    pub fn current(&self) -> Option<&Comparison> {
        self.pairs.get(self.cursor)
    }

    /// Consume the served comparison. Advancing a finished schedule is a no-op.
    pub fn advance(&self) -> Schedule {
        Schedule {
            pairs: Arc::clone(&self.pairs),
            cursor: (self.cursor + 1).min(self.pairs.len()),
        }
    }

    /// Comparisons not yet answered, in serving order.
    pub fn pending(&self) -> &[Comparison] {
        &self.pairs[self.cursor..]
    }

    pub fn total(&self) -> usize {
        self.pairs.len()
    }

    pub fn completed(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.pairs.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.pairs.len()
    }

    /// Fraction of comparisons answered, in `[0, 1]`.
    ///
    /// An empty schedule reports 1.0: there was nothing to do.
    pub fn progress(&self) -> f64 {
        if self.pairs.is_empty() {
            return 1.0;
        }
        self.cursor as f64 / self.pairs.len() as f64
    }
}
