/// Error types for tier list management and ranking sessions.
use thiserror::Error;

/// Errors from building sessions or editing a tier list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("duplicate item id \"{0}\" in one tier")]
    DuplicateItemId(String),

    #[error("tier label must not be blank")]
    EmptyLabel,

    #[error("item name must not be blank")]
    EmptyName,

    #[error("unknown tier \"{0}\"")]
    UnknownTier(String),

    #[error("unknown item \"{0}\"")]
    UnknownItem(String),

    #[error("tier index {index} out of range ({len} tiers)")]
    TierIndexOutOfRange { index: usize, len: usize },
}

/// A choice that does not apply to the comparison currently being served.
///
/// Never fatal: the session that rejected it is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StaleChoice {
    #[error("ranking is already complete")]
    SessionComplete,

    #[error("choice of \"{winner}\" over \"{loser}\" does not match the current comparison")]
    NotCurrentComparison { winner: String, loser: String },

    #[error("item \"{0}\" cannot be chosen over itself")]
    SameItem(String),
}
