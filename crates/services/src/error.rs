//! Shared error types for the services crate.

use thiserror::Error;

use content::ContentError;
use estrela_core::model::{CategoryId, Limit};

use crate::sessions::Phase;

/// Errors emitted by the deck builder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("no items match the selected categories")]
    EmptyPool,
}

/// Errors emitted by session actions.
///
/// Every variant is a refused precondition: the session is left exactly as it
/// was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("no items available for session")]
    Empty,
    #[error("no categories selected")]
    NoCategories,
    #[error("category {0} is not part of this session")]
    UnknownCategory(CategoryId),
    #[error("limit {limit} needs more than the {available} eligible items")]
    LimitUnavailable { limit: Limit, available: usize },
    #[error("action not allowed in the {actual:?} phase")]
    WrongPhase { actual: Phase },
    #[error("answer must be revealed before judging")]
    NotRevealed,
    #[error("answer already revealed")]
    AlreadyRevealed,
    #[error("transition ticket does not match the pending transition")]
    StaleTicket,
    #[error("no missed items to practice")]
    NothingMissed,
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
