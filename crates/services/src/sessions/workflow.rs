use estrela_core::model::{CategoryId, Flashcard, Limit, QuizItem};
use estrela_core::{Intensity, PraiseBook, Score};
use tracing::debug;

use super::service::{ExitTarget, Phase, QuizSession, Step};
use super::transition::TransitionTicket;
use super::view::SessionView;
use crate::error::SessionError;

/// Cosmetic effect fired when a session lands on a good result.
pub trait Celebration {
    fn celebrate(&self, intensity: Intensity);
}

/// Celebration that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn celebrate(&self, _intensity: Intensity) {}
}

/// Orchestrates a session with its results side effects.
///
/// Every entry into results picks a fresh praise phrase and, at 70% or more,
/// fires the celebration hook.
pub struct SessionRunner<T = QuizItem> {
    session: QuizSession<T>,
    praise: PraiseBook,
    celebration: Box<dyn Celebration>,
    last_praise: Option<String>,
}

impl<T: Flashcard> SessionRunner<T> {
    #[must_use]
    pub fn new(session: QuizSession<T>) -> Self {
        Self {
            session,
            praise: PraiseBook::default(),
            celebration: Box::new(NoCelebration),
            last_praise: None,
        }
    }

    #[must_use]
    pub fn with_praise(mut self, praise: PraiseBook) -> Self {
        self.praise = praise;
        self
    }

    #[must_use]
    pub fn with_celebration(mut self, celebration: impl Celebration + 'static) -> Self {
        self.celebration = Box::new(celebration);
        self
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession<T> {
        &self.session
    }

    /// Praise picked on the latest entry into results.
    #[must_use]
    pub fn praise(&self) -> Option<&str> {
        self.last_praise.as_deref()
    }

    /// Session snapshot with the results praise filled in.
    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        let mut view = self.session.view();
        if let Some(results) = view.results.as_mut() {
            results.praise = self.praise();
        }
        view
    }

    // ─── setup passthroughs ────────────────────────────────────────────────

    /// # Errors
    ///
    /// See [`QuizSession::toggle_category`].
    pub fn toggle_category(&mut self, category: &CategoryId) -> Result<(), SessionError> {
        self.session.toggle_category(category)
    }

    /// # Errors
    ///
    /// See [`QuizSession::select_all`].
    pub fn select_all(&mut self) -> Result<(), SessionError> {
        self.session.select_all()
    }

    /// # Errors
    ///
    /// See [`QuizSession::clear_categories`].
    pub fn clear_categories(&mut self) -> Result<(), SessionError> {
        self.session.clear_categories()
    }

    /// # Errors
    ///
    /// See [`QuizSession::set_limit`].
    pub fn set_limit(&mut self, limit: Limit) -> Result<(), SessionError> {
        self.session.set_limit(limit)
    }

    // ─── session actions ───────────────────────────────────────────────────

    /// # Errors
    ///
    /// See [`QuizSession::start`].
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.last_praise = None;
        self.session.start()
    }

    /// # Errors
    ///
    /// See [`QuizSession::reveal`].
    pub fn reveal(&mut self) -> Result<Step, SessionError> {
        self.session.reveal()
    }

    /// # Errors
    ///
    /// See [`QuizSession::judge`].
    pub fn judge(&mut self, correct: bool) -> Result<Step, SessionError> {
        let step = self.session.judge(correct)?;
        if let Step::Finished(score) = step {
            self.on_results(score);
        }
        Ok(step)
    }

    /// # Errors
    ///
    /// See [`QuizSession::complete_transition`].
    pub fn complete_transition(&mut self, ticket: TransitionTicket) -> Result<(), SessionError> {
        self.session.complete_transition(ticket)
    }

    /// # Errors
    ///
    /// See [`QuizSession::retry`].
    pub fn retry(&mut self) -> Result<(), SessionError> {
        self.session.retry()?;
        self.last_praise = None;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`QuizSession::practice_missed`].
    pub fn practice_missed(&mut self) -> Result<(), SessionError> {
        self.session.practice_missed()?;
        self.last_praise = None;
        Ok(())
    }

    #[must_use]
    pub fn exit(self) -> ExitTarget<Self> {
        let Self {
            session,
            praise,
            celebration,
            ..
        } = self;
        match session.exit() {
            ExitTarget::Setup(session) => ExitTarget::Setup(Self {
                session,
                praise,
                celebration,
                last_praise: None,
            }),
            ExitTarget::Leave => ExitTarget::Leave,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    fn on_results(&mut self, score: Score) {
        let phrase = self
            .praise
            .pick(score.tier(), self.session.rng_mut())
            .to_owned();
        debug!(tier = ?score.tier(), praise = %phrase, "picked praise");
        self.last_praise = Some(phrase);
        if let Some(intensity) = score.celebration() {
            debug!(?intensity, "celebrating");
            self.celebration.celebrate(intensity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::plan::Pool;
    use estrela_core::Tier;
    use estrela_core::model::{DeckFilter, HeText, PtText, VocabWord};
    use estrela_core::random::fixed_random;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Intensity>>>);

    impl Celebration for Recorder {
        fn celebrate(&self, intensity: Intensity) {
            self.0.borrow_mut().push(intensity);
        }
    }

    fn runner(words: usize, recorder: &Recorder) -> SessionRunner {
        let items = (0..words).map(|i| {
            VocabWord::new(
                PtText::parse(format!("palavra{i}")).unwrap(),
                HeText::parse("מילה").unwrap(),
            )
            .into()
        });
        let session =
            QuizSession::direct(Pool::uncategorized(items), DeckFilter::all(), fixed_random())
                .unwrap();
        SessionRunner::new(session).with_celebration(recorder.clone())
    }

    fn answer(runner: &mut SessionRunner, correct: bool) -> Step {
        if let Step::Pending(ticket) = runner.reveal().unwrap() {
            runner.complete_transition(ticket).unwrap();
        }
        let step = runner.judge(correct).unwrap();
        if let Step::Pending(ticket) = step {
            runner.complete_transition(ticket).unwrap();
        }
        step
    }

    #[test]
    fn perfect_score_celebrates_fully() {
        let recorder = Recorder::default();
        let mut r = runner(3, &recorder);
        for _ in 0..3 {
            answer(&mut r, true);
        }
        assert_eq!(*recorder.0.borrow(), vec![Intensity::Full]);
        let praise = r.praise().unwrap();
        assert!(PraiseBook::default().phrases(Tier::Perfect).iter().any(|p| p == praise));
        assert_eq!(r.view().results.unwrap().praise, Some(praise));
    }

    #[test]
    fn low_score_does_not_celebrate() {
        let recorder = Recorder::default();
        let mut r = runner(3, &recorder);
        for correct in [true, false, false] {
            answer(&mut r, correct);
        }
        assert!(recorder.0.borrow().is_empty());
        assert!(r.praise().is_some());
    }

    #[test]
    fn returning_from_recap_celebrates_again() {
        let recorder = Recorder::default();
        let mut r = runner(10, &recorder);
        for i in 0..10 {
            answer(&mut r, i < 8);
        }
        assert_eq!(*recorder.0.borrow(), vec![Intensity::Standard]);

        r.practice_missed().unwrap();
        assert!(r.praise().is_none());
        while r.phase() == Phase::Recap {
            answer(&mut r, true);
        }
        assert_eq!(
            *recorder.0.borrow(),
            vec![Intensity::Standard, Intensity::Standard]
        );
    }

    #[test]
    fn direct_runner_leaves_on_exit() {
        let recorder = Recorder::default();
        let r = runner(2, &recorder);
        assert!(matches!(r.exit(), ExitTarget::Leave));
    }
}
