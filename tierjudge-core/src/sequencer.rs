/// Tier-by-tier driver.
///
/// Walks an ordered tier list, runs one ranking session per tier, writes each
/// finished order back into its tier, and reports overall completion once.
/// Holds at most one live session; tiers never interact.
use tracing::{debug, info, warn};

use crate::engine::RankingSession;
use crate::error::{RankError, StaleChoice};
use crate::types::{ensure_unique_ids, Choice, Comparison, Item, Pick, Tier};

/// Notifications emitted while sequencing.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// A choice was recorded for tier `tier` (index into the tier list).
    Progress { tier: usize, fraction: f64 },
    /// Tier `tier` is done; `items` is its final order. Tiers with fewer than
    /// two items complete with their items untouched.
    TierComplete { tier: usize, items: Vec<Item> },
    /// Every tier is done. Emitted exactly once.
    AllComplete,
}

#[derive(Debug)]
pub struct TierSequencer {
    tiers: Vec<Tier>,
    /// Index of the tier being ranked; `tiers.len()` once everything is done.
    position: usize,
    session: Option<RankingSession>,
    complete: bool,
}

impl TierSequencer {
    /// Validate every tier and move to the first one that needs comparisons.
    ///
    /// Returns the signals for tiers that were skipped on the way (and
    /// `AllComplete` if nothing needs ranking at all).
    pub fn start(tiers: Vec<Tier>) -> Result<(Self, Vec<Signal>), RankError> {
        for tier in &tiers {
            ensure_unique_ids(&tier.items)?;
        }

        info!(num_tiers = tiers.len(), "tier sequencing started");

        let mut sequencer = TierSequencer {
            tiers,
            position: 0,
            session: None,
            complete: false,
        };
        let mut signals = Vec::new();
        sequencer.settle(&mut signals);
        Ok((sequencer, signals))
    }

    /// Skip forward over tiers that need no comparisons, open a session on the
    /// next one that does, or finish.
    fn settle(&mut self, signals: &mut Vec<Signal>) {
        while let Some(tier) = self.tiers.get(self.position) {
            if tier.items.len() >= 2 {
                debug!(tier = %tier.label, num_items = tier.items.len(), "ranking tier");
                self.session = Some(RankingSession::from_unique(&tier.items));
                return;
            }

            debug!(tier = %tier.label, num_items = tier.items.len(), "nothing to compare, skipping tier");
            signals.push(Signal::TierComplete {
                tier: self.position,
                items: tier.items.clone(),
            });
            self.position += 1;
        }

        self.session = None;
        if !self.complete {
            self.complete = true;
            info!("all tiers ranked");
            signals.push(Signal::AllComplete);
        }
    }

    /// Feed one choice to the active session.
    ///
    /// A stale choice is rejected and nothing changes.
    pub fn submit(&mut self, choice: &Choice) -> Result<Vec<Signal>, StaleChoice> {
        let session = self.session.as_ref().ok_or(StaleChoice::SessionComplete)?;

        let next = session.choose(choice).map_err(|stale| {
            warn!(reason = %stale, tier = self.position, "ignoring stale choice");
            stale
        })?;

        let mut signals = vec![Signal::Progress {
            tier: self.position,
            fraction: next.progress(),
        }];

        match next.result() {
            Some(ranked) => {
                let ranked = ranked.to_vec();
                self.tiers[self.position].items = ranked.clone();
                signals.push(Signal::TierComplete {
                    tier: self.position,
                    items: ranked,
                });
                self.position += 1;
                self.settle(&mut signals);
            }
            None => self.session = Some(next),
        }

        Ok(signals)
    }

    /// Pick the first or second item of the current comparison.
    pub fn pick(&mut self, pick: Pick) -> Result<Vec<Signal>, StaleChoice> {
        let choice = self.current_comparison().ok_or(StaleChoice::SessionComplete)?.choose(pick);
        self.submit(&choice)
    }

    /// Throw away partial progress on the current tier and start it over.
    pub fn restart_tier(&mut self) {
        if let Some(tier) = self.tiers.get(self.position) {
            if self.session.is_some() {
                debug!(tier = %tier.label, "restarting tier");
                self.session = Some(RankingSession::from_unique(&tier.items));
            }
        }
    }

    /// Index of the tier being ranked, `None` once complete.
    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(|_| self.position)
    }

    pub fn current_tier(&self) -> Option<&Tier> {
        self.current_index().map(|i| &self.tiers[i])
    }

    pub fn current_comparison(&self) -> Option<&Comparison> {
        self.session.as_ref().and_then(|s| s.current())
    }

    pub fn session(&self) -> Option<&RankingSession> {
        self.session.as_ref()
    }

    /// Progress within the current tier; 1.0 once everything is done.
    pub fn progress(&self) -> f64 {
        self.session.as_ref().map_or(1.0, |s| s.progress())
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn into_tiers(self) -> Vec<Tier> {
        self.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(label: &str, names: &[&str]) -> Tier {
        let items = names
            .iter()
            .map(|n| Item::new(format!("{label}-{n}"), *n))
            .collect();
        Tier::new(label, label).with_items(items)
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    fn count_all_complete(signals: &[Signal]) -> usize {
        signals.iter().filter(|s| matches!(s, Signal::AllComplete)).count()
    }

    /// Always pick whichever item's name sorts first.
    fn alphabetical(seq: &mut TierSequencer) -> Vec<Signal> {
        let cmp = seq.current_comparison().unwrap();
        let pick = if cmp.item1.name <= cmp.item2.name { Pick::First } else { Pick::Second };
        seq.pick(pick).unwrap()
    }

    #[test]
    fn test_empty_tier_list_completes_immediately() {
        let (seq, signals) = TierSequencer::start(Vec::new()).unwrap();
        assert!(seq.is_complete());
        assert_eq!(signals, vec![Signal::AllComplete]);
        assert!(seq.current_tier().is_none());
    }

    #[test]
    fn test_small_tiers_are_skipped() {
        let tiers = vec![tier("S", &["solo"]), tier("A", &[]), tier("B", &["x", "y"])];
        let (mut seq, signals) = TierSequencer::start(tiers).unwrap();

        assert_eq!(signals.len(), 2);
        assert!(matches!(&signals[0], Signal::TierComplete { tier: 0, items } if names(items) == ["solo"]));
        assert!(matches!(&signals[1], Signal::TierComplete { tier: 1, items } if items.is_empty()));
        assert_eq!(seq.current_index(), Some(2));
        assert_eq!(seq.current_tier().unwrap().label, "B");
        assert!(!seq.is_complete());

        let signals = seq.pick(Pick::Second).unwrap();
        assert_eq!(signals.len(), 3);
        assert_eq!(signals[0], Signal::Progress { tier: 2, fraction: 1.0 });
        assert!(matches!(&signals[1], Signal::TierComplete { tier: 2, items } if names(items) == ["y", "x"]));
        assert_eq!(signals[2], Signal::AllComplete);

        let tiers = seq.into_tiers();
        assert_eq!(names(&tiers[0].items), vec!["solo"]);
        assert_eq!(names(&tiers[2].items), vec!["y", "x"]);
    }

    #[test]
    fn test_all_tiers_trivial() {
        let (seq, signals) = TierSequencer::start(vec![tier("S", &["a"]), tier("A", &["b"])]).unwrap();
        assert!(seq.is_complete());
        assert_eq!(signals.len(), 3);
        assert_eq!(count_all_complete(&signals), 1);
        assert_eq!(seq.progress(), 1.0);
    }

    #[test]
    fn test_tiers_ranked_in_order() {
        let tiers = vec![tier("S", &["c", "a", "b"]), tier("A", &["z", "y"])];
        let (mut seq, signals) = TierSequencer::start(tiers).unwrap();
        assert!(signals.is_empty());

        let mut all = Vec::new();
        let mut tier_order = Vec::new();
        while !seq.is_complete() {
            if let Some(i) = seq.current_index() {
                if tier_order.last() != Some(&i) {
                    tier_order.push(i);
                }
            }
            all.extend(alphabetical(&mut seq));
        }

        assert_eq!(tier_order, vec![0, 1]);
        assert_eq!(count_all_complete(&all), 1);
        assert_eq!(all.last(), Some(&Signal::AllComplete));

        let tiers = seq.tiers();
        assert_eq!(names(&tiers[0].items), vec!["a", "b", "c"]);
        assert_eq!(names(&tiers[1].items), vec!["y", "z"]);
    }

    #[test]
    fn test_progress_signals_per_tier() {
        let (mut seq, _) = TierSequencer::start(vec![tier("S", &["a", "b", "c"])]).unwrap();
        let mut fractions = Vec::new();
        while !seq.is_complete() {
            for signal in alphabetical(&mut seq) {
                if let Signal::Progress { tier, fraction } = signal {
                    assert_eq!(tier, 0);
                    fractions.push(fraction);
                }
            }
        }
        assert_eq!(fractions.len(), 3);
        assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(fractions.last(), Some(&1.0));
    }

    #[test]
    fn test_stale_choice_changes_nothing() {
        let (mut seq, _) = TierSequencer::start(vec![tier("S", &["a", "b", "c"])]).unwrap();
        let bogus = Choice::new(Item::new("S-b", "b"), Item::new("S-c", "c"));
        assert!(matches!(seq.submit(&bogus), Err(StaleChoice::NotCurrentComparison { .. })));
        assert_eq!(seq.progress(), 0.0);
        assert_eq!(seq.session().unwrap().remaining_comparisons(), 3);
    }

    #[test]
    fn test_choice_after_completion_rejected() {
        let (mut seq, _) = TierSequencer::start(vec![tier("S", &["a", "b"])]).unwrap();
        let done = seq.pick(Pick::First).unwrap();
        assert_eq!(count_all_complete(&done), 1);

        let again = Choice::new(Item::new("S-b", "b"), Item::new("S-a", "a"));
        assert_eq!(seq.submit(&again), Err(StaleChoice::SessionComplete));
        assert_eq!(seq.pick(Pick::First), Err(StaleChoice::SessionComplete));
        assert_eq!(names(&seq.tiers()[0].items), vec!["a", "b"]);
    }

    #[test]
    fn test_restart_tier_discards_progress() {
        let (mut seq, _) = TierSequencer::start(vec![tier("S", &["a", "b", "c"])]).unwrap();
        seq.pick(Pick::Second).unwrap();
        assert!(seq.progress() > 0.0);

        seq.restart_tier();
        assert_eq!(seq.progress(), 0.0);
        assert!(seq.session().unwrap().scores().is_empty());
        let cmp = seq.current_comparison().unwrap();
        assert_eq!((cmp.item1.name.as_str(), cmp.item2.name.as_str()), ("a", "b"));
    }

    #[test]
    fn test_duplicate_ids_rejected_up_front() {
        let bad = Tier::new("S", "S").with_items(vec![Item::new("1", "a"), Item::new("1", "b")]);
        let result = TierSequencer::start(vec![tier("A", &["x", "y"]), bad]);
        assert!(matches!(result, Err(RankError::DuplicateItemId(id)) if id == "1"));
    }

    #[test]
    fn test_same_id_in_different_tiers_is_fine() {
        let s = Tier::new("S", "S").with_items(vec![Item::new("1", "a"), Item::new("2", "b")]);
        let a = Tier::new("A", "A").with_items(vec![Item::new("1", "c"), Item::new("2", "d")]);
        assert!(TierSequencer::start(vec![s, a]).is_ok());
    }
}
