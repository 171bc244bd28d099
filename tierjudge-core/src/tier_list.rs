/// Tier list model: tiers, the pool of unassigned items, and the edits a
/// user makes before sorting.
///
/// Ids are generated from a per-list counter so they are unique within the
/// list and reproducible in tests.
use tracing::debug;

use crate::error::RankError;
use crate::sequencer::{Signal, TierSequencer};
use crate::types::{Item, Tier};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierList {
    pub id: String,
    pub name: String,
    pub tiers: Vec<Tier>,
    /// Items not yet placed in any tier.
    pub unassigned: Vec<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    next_id: u64,
}

impl TierList {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        TierList {
            id: id.into(),
            name: name.into(),
            tiers: Vec::new(),
            unassigned: Vec::new(),
            next_id: 0,
        }
    }

    fn generate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Append a tier. Blank labels are rejected; the label is kept as typed.
    pub fn add_tier(&mut self, label: &str) -> Result<&Tier, RankError> {
        if label.trim().is_empty() {
            return Err(RankError::EmptyLabel);
        }
        let id = self.generate_id("tier");
        debug!(tier = %id, label, "tier added");
        self.tiers.push(Tier::new(id, label));
        Ok(&self.tiers[self.tiers.len() - 1])
    }

    /// Remove a tier along with the items placed in it.
    pub fn remove_tier(&mut self, tier_id: &str) -> Result<Tier, RankError> {
        let idx = self.tier_index(tier_id)?;
        Ok(self.tiers.remove(idx))
    }

    /// Move the tier at `from` so it ends up at index `to`.
    pub fn move_tier(&mut self, from: usize, to: usize) -> Result<(), RankError> {
        let len = self.tiers.len();
        for index in [from, to] {
            if index >= len {
                return Err(RankError::TierIndexOutOfRange { index, len });
            }
        }
        let tier = self.tiers.remove(from);
        self.tiers.insert(to, tier);
        Ok(())
    }

    /// Add an item to the unassigned pool. Blank names are rejected.
    pub fn add_item(&mut self, name: &str) -> Result<&Item, RankError> {
        if name.trim().is_empty() {
            return Err(RankError::EmptyName);
        }
        let id = self.generate_id("item");
        self.unassigned.push(Item::new(id, name));
        Ok(&self.unassigned[self.unassigned.len() - 1])
    }

    /// Delete an unassigned item.
    pub fn remove_item(&mut self, item_id: &str) -> Result<Item, RankError> {
        let idx = self
            .unassigned
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| RankError::UnknownItem(item_id.to_string()))?;
        Ok(self.unassigned.remove(idx))
    }

    /// Move an unassigned item to the end of a tier.
    pub fn assign_to_tier(&mut self, item_id: &str, tier_id: &str) -> Result<(), RankError> {
        let tier_idx = self.tier_index(tier_id)?;
        let item = self.remove_item(item_id)?;
        debug!(item = %item.id, tier = %tier_id, "item assigned");
        self.tiers[tier_idx].items.push(item);
        Ok(())
    }

    pub fn tier(&self, tier_id: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.id == tier_id)
    }

    fn tier_index(&self, tier_id: &str) -> Result<usize, RankError> {
        self.tiers
            .iter()
            .position(|t| t.id == tier_id)
            .ok_or_else(|| RankError::UnknownTier(tier_id.to_string()))
    }

    /// Sorting only makes sense once some tier holds two or more items.
    pub fn sortable(&self) -> bool {
        self.tiers.iter().any(|t| t.items.len() >= 2)
    }

    /// Start ranking a copy of this list's tiers.
    pub fn start_sorting(&self) -> Result<(TierSequencer, Vec<Signal>), RankError> {
        TierSequencer::start(self.tiers.clone())
    }

    /// Take the ranked tiers back from a finished (or abandoned) sequencer.
    pub fn apply_sorted(&mut self, sequencer: TierSequencer) {
        self.tiers = sequencer.into_tiers();
    }
}
