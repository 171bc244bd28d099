/// Win-count scoring. Pure functions, no IO, no hidden state.
///
/// A score is the number of comparisons an item won inside one session.
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::types::Item;

/// Win counts keyed by item id, scoped to one ranking session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreTable {
    wins: HashMap<String, u32>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new table with `winner` credited one win.
    ///
    /// `loser` gets an explicit zero entry if it had none, so every compared
    /// item shows up in the table even without a win.
    pub fn record_choice(&self, winner: &Item, loser: &Item) -> ScoreTable {
        let mut next = self.clone();
        next.record(winner, loser);
        next
    }

    pub(crate) fn record(&mut self, winner: &Item, loser: &Item) {
        *self.wins.entry(winner.id.clone()).or_insert(0) += 1;
        self.wins.entry(loser.id.clone()).or_insert(0);
    }

    /// Wins for `id`. Items never compared score 0.
    pub fn score(&self, id: &str) -> u32 {
        self.wins.get(id).copied().unwrap_or(0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.wins.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.wins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.wins.iter().map(|(id, &wins)| (id.as_str(), wins))
    }
}

/// Order `items` by descending score.
///
/// The sort is stable: items with equal scores keep their input order. Two
/// items that never beat anything must not swap places arbitrarily.
pub fn finalize(items: &[Item], scores: &ScoreTable) -> Vec<Item> {
    let mut ranked = items.to_vec();
    ranked.sort_by_key(|item| Reverse(scores.score(&item.id)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item::new(id, id.to_uppercase())
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_record_choice_credits_winner_only() {
        let table = ScoreTable::new().record_choice(&item("x"), &item("y"));
        assert_eq!(table.score("x"), 1);
        assert_eq!(table.score("y"), 0);
        assert!(table.contains("y"), "loser must get an explicit zero entry");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_record_choice_is_pure() {
        let before = ScoreTable::new().record_choice(&item("x"), &item("y"));
        let after = before.record_choice(&item("y"), &item("x"));
        assert_eq!(before.score("y"), 0);
        assert_eq!(after.score("y"), 1);
        assert_eq!(after.score("x"), 1);
    }

    #[test]
    fn test_loss_keeps_existing_wins() {
        let table = ScoreTable::new()
            .record_choice(&item("x"), &item("y"))
            .record_choice(&item("z"), &item("x"));
        assert_eq!(table.score("x"), 1);
        assert_eq!(table.score("z"), 1);
    }

    #[test]
    fn test_unknown_item_scores_zero() {
        let table = ScoreTable::new();
        assert!(table.is_empty());
        assert_eq!(table.score("nobody"), 0);
        assert!(!table.contains("nobody"));
    }

    #[test]
    fn test_finalize_orders_by_wins() {
        let items = vec![item("z"), item("y"), item("x")];
        let table = ScoreTable::new()
            .record_choice(&item("x"), &item("y"))
            .record_choice(&item("x"), &item("z"))
            .record_choice(&item("y"), &item("z"));
        assert_eq!(ids(&finalize(&items, &table)), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_finalize_is_stable_on_ties() {
        // a beats b and c; b and c both end on zero.
        let table = ScoreTable::new()
            .record_choice(&item("a"), &item("b"))
            .record_choice(&item("a"), &item("c"));

        let items = vec![item("b"), item("a"), item("c")];
        assert_eq!(ids(&finalize(&items, &table)), vec!["a", "b", "c"]);

        let items = vec![item("c"), item("a"), item("b")];
        assert_eq!(ids(&finalize(&items, &table)), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_finalize_single_item_unchanged() {
        let items = vec![item("solo")];
        assert_eq!(finalize(&items, &ScoreTable::new()), items);
        assert!(finalize(&[], &ScoreTable::new()).is_empty());
    }

    #[test]
    fn test_iter_reports_every_entry() {
        let table = ScoreTable::new()
            .record_choice(&item("a"), &item("b"))
            .record_choice(&item("a"), &item("c"));
        let mut entries: Vec<(&str, u32)> = table.iter().collect();
        entries.sort();
        assert_eq!(entries, vec![("a", 2), ("b", 0), ("c", 0)]);
    }
}
