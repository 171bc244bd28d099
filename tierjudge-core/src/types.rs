use std::collections::HashSet;

use crate::error::RankError;

/// Something being ranked.
///
/// Identity is the caller-provided `id`. Names are free text and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A labeled bucket of items, e.g. "S" or "A".
///
/// `items` is in arrival order until the tier has been ranked, then in
/// descending score order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tier {
    pub id: String,
    pub label: String,
    /// Display color hint. The engine never looks at it.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub color: Option<String>,
    pub items: Vec<Item>,
}

impl Tier {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Tier {
            id: id.into(),
            label: label.into(),
            color: None,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }
}

/// Which side of a comparison the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pick {
    First,
    Second,
}

/// One unordered pair of distinct items from the same tier.
///
/// `item1`/`item2` only record presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    pub item1: Item,
    pub item2: Item,
}

impl Comparison {
    /// Turn a pick into a choice event for this comparison.
    pub fn choose(&self, pick: Pick) -> Choice {
        match pick {
            Pick::First => Choice::new(self.item1.clone(), self.item2.clone()),
            Pick::Second => Choice::new(self.item2.clone(), self.item1.clone()),
        }
    }

    /// True if the choice names exactly this pair, in either orientation.
    pub fn matches(&self, choice: &Choice) -> bool {
        let (a, b) = (&self.item1.id, &self.item2.id);
        (choice.winner.id == *a && choice.loser.id == *b)
            || (choice.winner.id == *b && choice.loser.id == *a)
    }
}

/// The one inbound event of a ranking session: "winner is better than loser".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choice {
    pub winner: Item,
    pub loser: Item,
}

impl Choice {
    pub fn new(winner: Item, loser: Item) -> Self {
        Choice { winner, loser }
    }
}

/// Internal indexed pair (positions in the session's item list, not ids).
pub(crate) type IndexedPair = (usize, usize);

/// Reject item lists where an id occurs more than once.
pub(crate) fn ensure_unique_ids(items: &[Item]) -> Result<(), RankError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(RankError::DuplicateItemId(item.id.clone()));
        }
    }
    Ok(())
}
