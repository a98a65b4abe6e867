#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use error::{DeckError, QuizError, SessionError};

pub use sessions::{
    Celebration, Entry, ExitTarget, NoCelebration, Phase, Pool, QuizService, QuizSession,
    SessionRunner, SessionView, Scope, Step, build_deck,
};
