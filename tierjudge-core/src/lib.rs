//! tierjudge-core: Pure-computation ranking engine for tier lists.
//!
//! Items in a tier → every pairwise comparison → win counts → ranked tier.
//! No IO and no UI of its own: the caller presents comparisons and reports picks.
//!
//! Items are identified by caller-provided string ids. Names are free text.
//!
//! # Quick start
//!
//! ```rust
//! use tierjudge_core::{Item, Pick, RankingSession};
//!
//! let items = vec![
//!     Item::new("1", "Pizza"),
//!     Item::new("2", "Sushi"),
//!     Item::new("3", "Tacos"),
//! ];
//!
//! let mut session = RankingSession::start(&items).unwrap();
//! while let Some(cmp) = session.current() {
//!     // Ask the user here. This one always prefers the shorter name.
//!     let pick = if cmp.item1.name.len() <= cmp.item2.name.len() { Pick::First } else { Pick::Second };
//!     session = session.pick(pick).unwrap();
//! }
//!
//! for (rank, item) in session.result().unwrap().iter().enumerate() {
//!     println!("{}. {} ({} wins)", rank + 1, item.name, session.scores().score(&item.id));
//! }
//! ```
//!
//! To rank a whole tier list one tier at a time, see [`TierSequencer`].

pub mod engine;
pub mod error;
pub mod pairing;
pub mod scoring;
pub mod sequencer;
pub mod tier_list;
pub mod types;

// Re-export primary public API at crate root.
pub use engine::{Outcome, RankingSession, SessionState};
pub use error::{RankError, StaleChoice};
pub use pairing::{generate_exhaustive_pairings, total_comparisons, Schedule};
pub use scoring::{finalize, ScoreTable};
pub use sequencer::{Signal, TierSequencer};
pub use tier_list::TierList;
pub use types::{Choice, Comparison, Item, Pick, Tier};
