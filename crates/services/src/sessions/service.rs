use std::collections::BTreeSet;

use estrela_core::model::{CategoryId, DeckFilter, Flashcard, Limit, QuizItem};
use estrela_core::{RandomSource, Score};
use tracing::{debug, info, warn};

use super::plan::{Pool, build_deck};
use super::progress::SessionProgress;
use super::transition::{TransitionKind, TransitionLock, TransitionTicket};
use crate::error::SessionError;

//
// ─── PHASES AND OUTCOMES ───────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Choosing categories and a count.
    Setup,
    /// The scored pass over the deck.
    Quiz,
    /// Unscored re-quiz of missed items.
    Recap,
    /// Score is frozen.
    Results,
}

/// How the session was entered; decides where `exit` leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    Setup,
    Direct,
}

/// Outcome of a reveal or judge action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// State changed immediately.
    Applied,
    /// Change deferred until `complete_transition` is called with the ticket.
    Pending(TransitionTicket),
    /// A transition was in flight; nothing happened.
    Dropped,
    /// The session entered `Results` with this score.
    Finished(Score),
}

/// Where the learner ends up after `exit`.
#[derive(Debug)]
pub enum ExitTarget<S> {
    /// Back to category selection; the selection survives, the run does not.
    Setup(S),
    /// The caller should leave the quiz screen.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Pending {
    Reveal,
    Advance { correct: bool },
}

/// A single count option as offered on the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitChoice {
    pub limit: Limit,
    pub enabled: bool,
    pub selected: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over a pool of flashcards.
///
/// Drives `Setup → Quiz → Recap* → Results`. Reveals and non-final judgments
/// are two-phase: the action hands out a [`TransitionTicket`] and the change
/// lands when the presentation layer calls [`QuizSession::complete_transition`].
#[derive(Debug, Clone)]
pub struct QuizSession<T = QuizItem> {
    pub(super) entry: Entry,
    pub(super) pool: Pool<T>,
    pub(super) filter: DeckFilter,
    pub(super) rng: RandomSource,
    pub(super) phase: Phase,
    pub(super) deck: Vec<T>,
    pub(super) position: usize,
    pub(super) revealed: bool,
    pub(super) correct: usize,
    pub(super) total: usize,
    pub(super) missed: Vec<T>,
    pub(super) recap_pass: u32,
    pub(super) lock: TransitionLock<Pending>,
}

impl<T: Flashcard> QuizSession<T> {
    /// A session waiting on the setup screen.
    #[must_use]
    pub fn setup(pool: Pool<T>, filter: DeckFilter, rng: RandomSource) -> Self {
        Self {
            entry: Entry::Setup,
            pool,
            filter,
            rng,
            phase: Phase::Setup,
            deck: Vec::new(),
            position: 0,
            revealed: false,
            correct: 0,
            total: 0,
            missed: Vec::new(),
            recap_pass: 0,
            lock: TransitionLock::default(),
        }
    }

    /// A session that skips setup and starts quizzing right away.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Deck` or `SessionError::Empty` if the filter
    /// yields no items.
    pub fn direct(pool: Pool<T>, filter: DeckFilter, rng: RandomSource) -> Result<Self, SessionError> {
        let mut session = Self::setup(pool, filter, rng);
        session.entry = Entry::Direct;
        session.begin_quiz()?;
        Ok(session)
    }

    // ─── setup editing ─────────────────────────────────────────────────────

    /// Selects or deselects one category.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside setup and
    /// `SessionError::UnknownCategory` for a category the pool does not have.
    pub fn toggle_category(&mut self, category: &CategoryId) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Setup)?;
        if !self.pool.contains_category(category) {
            warn!(%category, "toggle refused: unknown category");
            return Err(SessionError::UnknownCategory(category.clone()));
        }
        let mut selected = self.selected_set();
        if !selected.remove(category) {
            selected.insert(category.clone());
        }
        self.filter.categories = Some(selected);
        debug!(%category, eligible = self.eligible_count(), "toggled category");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside setup.
    pub fn select_all(&mut self) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Setup)?;
        self.filter.categories = None;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside setup.
    pub fn clear_categories(&mut self) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Setup)?;
        self.filter.categories = Some(BTreeSet::new());
        Ok(())
    }

    /// Chooses the deck size.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside setup and
    /// `SessionError::LimitUnavailable` for a count larger than the eligible pool.
    pub fn set_limit(&mut self, limit: Limit) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Setup)?;
        let available = self.eligible_count();
        if !limit.fits(available) {
            warn!(%limit, available, "limit refused");
            return Err(SessionError::LimitUnavailable { limit, available });
        }
        self.filter.limit = limit;
        Ok(())
    }

    /// Count options with their enabled state for the current selection.
    #[must_use]
    pub fn limit_choices(&self, options: &[Limit]) -> Vec<LimitChoice> {
        let available = self.eligible_count();
        options
            .iter()
            .map(|&limit| LimitChoice {
                limit,
                enabled: limit.fits(available),
                selected: limit == self.filter.limit,
            })
            .collect()
    }

    /// Whether every category of the pool is selected.
    #[must_use]
    pub fn all_selected(&self) -> bool {
        match &self.filter.categories {
            None => true,
            Some(selected) => self.pool.categories().into_iter().all(|c| selected.contains(c)),
        }
    }

    #[must_use]
    pub fn is_selected(&self, category: &CategoryId) -> bool {
        self.filter.admits(Some(category))
    }

    /// Items the current category selection admits, before the count cap.
    #[must_use]
    pub fn eligible_count(&self) -> usize {
        self.pool.eligible(&self.filter)
    }

    /// Builds the deck and enters the quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside setup,
    /// `SessionError::NoCategories` with nothing selected, and
    /// `SessionError::Deck`/`SessionError::Empty` if no items would be drawn.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Setup)?;
        if self.filter.categories.as_ref().is_some_and(BTreeSet::is_empty) {
            warn!("start refused: no categories selected");
            return Err(SessionError::NoCategories);
        }
        self.begin_quiz()
    }

    // ─── quiz actions ──────────────────────────────────────────────────────

    /// Asks to flip the current card.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside quiz/recap and
    /// `SessionError::AlreadyRevealed` if the answer is showing.
    pub fn reveal(&mut self) -> Result<Step, SessionError> {
        self.ensure_running()?;
        if self.lock.is_held() {
            debug!("reveal dropped: transition in flight");
            return Ok(Step::Dropped);
        }
        if self.revealed {
            warn!("reveal refused: already revealed");
            return Err(SessionError::AlreadyRevealed);
        }
        Ok(self.gate(TransitionKind::Flip, Pending::Reveal))
    }

    /// Records the learner's self-judgment of the current card.
    ///
    /// The last card of a pass is applied immediately; any other card waits
    /// for the slide transition.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside quiz/recap and
    /// `SessionError::NotRevealed` before the answer is shown.
    pub fn judge(&mut self, correct: bool) -> Result<Step, SessionError> {
        self.ensure_running()?;
        if self.lock.is_held() {
            debug!(correct, "judge dropped: transition in flight");
            return Ok(Step::Dropped);
        }
        if !self.revealed {
            warn!("judge refused: answer not revealed");
            return Err(SessionError::NotRevealed);
        }

        if self.position + 1 < self.deck.len() {
            return Ok(self.gate(TransitionKind::Slide, Pending::Advance { correct }));
        }

        Ok(match self.phase {
            Phase::Recap => self.finish_recap_pass(correct),
            _ => {
                self.record(correct);
                Step::Finished(self.enter_results())
            }
        })
    }

    /// Applies the change deferred by `ticket` and releases the lock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleTicket` if `ticket` is not the transition in
    /// flight.
    pub fn complete_transition(&mut self, ticket: TransitionTicket) -> Result<(), SessionError> {
        let Some(pending) = self.lock.release(ticket) else {
            warn!(?ticket, "stale transition ticket");
            return Err(SessionError::StaleTicket);
        };
        match pending {
            Pending::Reveal => self.revealed = true,
            Pending::Advance { correct } => {
                self.record(correct);
                self.position += 1;
                self.revealed = false;
            }
        }
        debug!(kind = ?ticket.kind(), position = self.position, "transition complete");
        Ok(())
    }

    // ─── results actions ───────────────────────────────────────────────────

    /// Runs the quiz again on a freshly drawn deck with the same filter.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside results.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Results)?;
        self.begin_quiz()
    }

    /// Re-quizzes the items missed in the scored pass.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside results and
    /// `SessionError::NothingMissed` when every item was judged correct.
    pub fn practice_missed(&mut self) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Results)?;
        if self.missed.is_empty() {
            warn!("practice refused: nothing missed");
            return Err(SessionError::NothingMissed);
        }
        let missed = self.missed.clone();
        self.begin_recap(missed);
        Ok(())
    }

    /// Leaves the current screen.
    ///
    /// Setup-entry sessions go back to setup; direct-entry sessions and a
    /// session already on setup tell the caller to leave.
    #[must_use]
    pub fn exit(mut self) -> ExitTarget<Self> {
        self.lock.clear();
        match (self.entry, self.phase) {
            (Entry::Direct, _) | (Entry::Setup, Phase::Setup) => {
                debug!("exit: leaving");
                ExitTarget::Leave
            }
            (Entry::Setup, _) => {
                self.reset_run();
                self.phase = Phase::Setup;
                debug!("exit: back to setup");
                ExitTarget::Setup(self)
            }
        }
    }

    // ─── accessors ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn entry(&self) -> Entry {
        self.entry
    }

    #[must_use]
    pub fn filter(&self) -> &DeckFilter {
        &self.filter
    }

    #[must_use]
    pub fn pool(&self) -> &Pool<T> {
        &self.pool
    }

    /// The card on screen, if a pass is running.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        match self.phase {
            Phase::Quiz | Phase::Recap => self.deck.get(self.position),
            Phase::Setup | Phase::Results => None,
        }
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.lock.is_held()
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Items judged incorrect in the scored pass, in the order they were missed.
    #[must_use]
    pub fn missed(&self) -> &[T] {
        &self.missed
    }

    /// Number of recap passes started since the last quiz start.
    #[must_use]
    pub fn recap_pass(&self) -> u32 {
        self.recap_pass
    }

    /// Cards in the running pass.
    #[must_use]
    pub fn pass_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        Score::new(self.correct, self.total)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress::new(self.phase, self.position, self.deck.len(), self.correct, self.total)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    // ─── internals ─────────────────────────────────────────────────────────

    fn ensure_phase(&self, expected: Phase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            warn!(?expected, actual = ?self.phase, "action refused in this phase");
            Err(SessionError::WrongPhase { actual: self.phase })
        }
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Quiz | Phase::Recap => Ok(()),
            actual => {
                warn!(?actual, "action refused outside a running pass");
                Err(SessionError::WrongPhase { actual })
            }
        }
    }

    fn selected_set(&self) -> BTreeSet<CategoryId> {
        match &self.filter.categories {
            Some(selected) => selected.clone(),
            None => self.pool.categories().into_iter().cloned().collect(),
        }
    }

    fn gate(&mut self, kind: TransitionKind, pending: Pending) -> Step {
        match self.lock.try_acquire(kind, pending) {
            Some(ticket) => Step::Pending(ticket),
            None => Step::Dropped,
        }
    }

    /// Score bookkeeping; only the scored pass counts.
    fn record(&mut self, correct: bool) {
        if self.phase != Phase::Quiz {
            return;
        }
        if correct {
            self.correct += 1;
        } else if let Some(item) = self.deck.get(self.position) {
            self.missed.push(item.clone());
        }
    }

    fn begin_quiz(&mut self) -> Result<(), SessionError> {
        let deck = build_deck(&self.pool, &self.filter, &mut self.rng)?;
        if deck.is_empty() {
            warn!(limit = %self.filter.limit, "start refused: empty deck");
            return Err(SessionError::Empty);
        }
        self.reset_run();
        self.total = deck.len();
        self.deck = deck;
        self.phase = Phase::Quiz;
        info!(total = self.total, entry = ?self.entry, "quiz started");
        Ok(())
    }

    fn reset_run(&mut self) {
        self.lock.clear();
        self.deck.clear();
        self.position = 0;
        self.revealed = false;
        self.correct = 0;
        self.total = 0;
        self.missed.clear();
        self.recap_pass = 0;
    }

    pub(super) fn enter_results(&mut self) -> Score {
        self.lock.clear();
        self.phase = Phase::Results;
        self.deck.clear();
        self.position = 0;
        self.revealed = false;
        let score = self.score();
        info!(
            correct = score.correct(),
            total = score.total(),
            percent = score.percent(),
            tier = ?score.tier(),
            missed = self.missed.len(),
            "results"
        );
        score
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
