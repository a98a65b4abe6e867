mod plan;
mod progress;
mod queries;
mod recap;
mod service;
mod transition;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{DeckError, SessionError};
pub use plan::{Pool, PoolEntry, build_deck};
pub use progress::SessionProgress;
pub use queries::{ParseScopeError, QuizService, Scope};
pub use recap::remaining_after_pass;
pub use service::{Entry, ExitTarget, LimitChoice, Phase, QuizSession, Step};
pub use transition::{TransitionKind, TransitionTicket};
pub use view::{ResultsView, SessionView};
pub use workflow::{Celebration, NoCelebration, SessionRunner};
