/// Ranking session state machine.
///
/// Pure computation, no IO. The caller presents `current()` however it likes,
/// collects the user's pick, and feeds it back as a `Choice`. Every
/// transition returns a fresh snapshot; a rejected choice leaves the old one
/// untouched.
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{RankError, StaleChoice};
use crate::pairing::Schedule;
use crate::scoring::{finalize, ScoreTable};
use crate::types::{ensure_unique_ids, Choice, Comparison, Item, Pick};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// A comparison is being presented.
    AwaitingChoice,
    /// No comparisons remain; the ranked order is available.
    Complete,
}

/// What `RankingSession::submit` did with a choice.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Choice recorded, more comparisons remain.
    Accepted { progress: f64 },
    /// That was the last comparison. Holds the ranked items.
    Completed(Vec<Item>),
    /// Choice did not apply and was dropped. The session is unchanged.
    Ignored(StaleChoice),
}

/// Snapshot of one tier's ranking session.
#[derive(Debug, Clone)]
pub struct RankingSession {
    /// Input items in arrival order. Ties in the result keep this order.
    items: Arc<[Item]>,
    schedule: Schedule,
    scores: ScoreTable,
    /// Set once the session is complete.
    result: Option<Vec<Item>>,
}

impl RankingSession {
    /// Start ranking `items`.
    ///
    /// With fewer than two items the session is complete immediately and the
    /// result is the input order.
    pub fn start(items: &[Item]) -> Result<Self, RankError> {
        ensure_unique_ids(items)?;
        Ok(Self::from_unique(items))
    }

    /// Callers must have checked id uniqueness already.
    pub(crate) fn from_unique(items: &[Item]) -> Self {
        let schedule = Schedule::start(items);
        let result = if schedule.is_finished() {
            debug!(num_items = items.len(), "fewer than two items, nothing to compare");
            Some(items.to_vec())
        } else {
            debug!(
                num_items = items.len(),
                comparisons = schedule.total(),
                "ranking session started"
            );
            None
        };

        RankingSession {
            items: items.into(),
            schedule,
            scores: ScoreTable::new(),
            result,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.result.is_some() {
            SessionState::Complete
        } else {
            SessionState::AwaitingChoice
        }
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// Comparison awaiting a choice, `None` once complete.
    pub fn current(&self) -> Option<&Comparison> {
        self.schedule.current()
    }

    /// Fraction of comparisons answered: 0.0 before the first choice, exactly
    /// 1.0 once complete.
    pub fn progress(&self) -> f64 {
        self.schedule.progress()
    }

    pub fn total_comparisons(&self) -> usize {
        self.schedule.total()
    }

    pub fn remaining_comparisons(&self) -> usize {
        self.schedule.remaining()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    /// Ranked items, available once the session is complete.
    pub fn result(&self) -> Option<&[Item]> {
        self.result.as_deref()
    }

    /// Check that `choice` answers the comparison currently being served.
    pub fn validate(&self, choice: &Choice) -> Result<(), StaleChoice> {
        let current = match self.current() {
            Some(c) if self.result.is_none() => c,
            _ => return Err(StaleChoice::SessionComplete),
        };
        if choice.winner.id == choice.loser.id {
            return Err(StaleChoice::SameItem(choice.winner.id.clone()));
        }
        if !current.matches(choice) {
            return Err(StaleChoice::NotCurrentComparison {
                winner: choice.winner.id.clone(),
                loser: choice.loser.id.clone(),
            });
        }
        Ok(())
    }

    /// Apply a choice and return the next snapshot.
    ///
    /// Stale choices (wrong pair, or anything after completion) are rejected
    /// and `self` stays valid as the current state.
    pub fn choose(&self, choice: &Choice) -> Result<RankingSession, StaleChoice> {
        self.validate(choice)?;

        let scores = self.scores.record_choice(&choice.winner, &choice.loser);
        let schedule = self.schedule.advance();

        debug!(
            winner = %choice.winner.id,
            loser = %choice.loser.id,
            remaining = schedule.remaining(),
            "choice recorded"
        );

        let result = if schedule.is_finished() {
            let ranked = finalize(&self.items, &scores);
            info!(num_items = ranked.len(), "ranking session complete");
            Some(ranked)
        } else {
            None
        };

        Ok(RankingSession {
            items: Arc::clone(&self.items),
            schedule,
            scores,
            result,
        })
    }

    /// Apply a pick of the first or second item of the current comparison.
    pub fn pick(&self, pick: Pick) -> Result<RankingSession, StaleChoice> {
        let choice = self
            .current()
            .ok_or(StaleChoice::SessionComplete)?
            .choose(pick);
        self.choose(&choice)
    }

    /// In-place variant of `choose` for callers that own a single session.
    pub fn submit(&mut self, choice: &Choice) -> Outcome {
        match self.choose(choice) {
            Ok(next) => {
                *self = next;
                match &self.result {
                    Some(ranked) => Outcome::Completed(ranked.clone()),
                    None => Outcome::Accepted {
                        progress: self.progress(),
                    },
                }
            }
            Err(stale) => {
                warn!(reason = %stale, "ignoring stale choice");
                Outcome::Ignored(stale)
            }
        }
    }
}
