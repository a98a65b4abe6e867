use estrela_core::Score;
use estrela_core::model::{Face, Flashcard};

use super::service::{Entry, Phase, QuizSession};

/// Presentation-agnostic snapshot of a session.
///
/// This is intentionally **not** a UI view-model: faces carry language tags
/// and raw text, and the presentation layer decides how to lay them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView<'a> {
    pub phase: Phase,
    pub entry: Entry,
    pub position: usize,
    pub pass_len: usize,
    pub revealed: bool,
    /// Set while a pass is running.
    pub prompt: Option<Face<'a>>,
    /// Set once the answer is revealed.
    pub answer: Option<Face<'a>>,
    pub correct: usize,
    pub total: usize,
    pub missed_count: usize,
    pub progress_percent: u8,
    pub recap_pass: u32,
    pub transitioning: bool,
    pub results: Option<ResultsView<'a>>,
}

/// What the results screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView<'a> {
    pub score: Score,
    pub missed_count: usize,
    pub can_practice_missed: bool,
    /// Filled in by the runner that picked it.
    pub praise: Option<&'a str>,
}

impl<T: Flashcard> QuizSession<T> {
    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        let progress = self.progress();
        let current = self.current();
        let missed_count = self.missed().len();
        SessionView {
            phase: self.phase(),
            entry: self.entry(),
            position: progress.position,
            pass_len: progress.pass_len,
            revealed: self.is_revealed(),
            prompt: current.map(|card| card.prompt()),
            answer: current.filter(|_| self.is_revealed()).map(|card| card.answer()),
            correct: self.correct(),
            total: self.total(),
            missed_count,
            progress_percent: progress.percent,
            recap_pass: self.recap_pass(),
            transitioning: self.is_transitioning(),
            results: (self.phase() == Phase::Results).then(|| ResultsView {
                score: self.score(),
                missed_count,
                can_practice_missed: missed_count > 0,
                praise: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::plan::Pool;
    use crate::sessions::service::Step;
    use estrela_core::model::{DeckFilter, GrammarSentence, HeText, Hint, Lang, PtText, QuizItem};
    use estrela_core::random::fixed_random;

    fn sentence() -> QuizItem {
        GrammarSentence {
            blank_pt: PtText::parse("Ela ___ médica.").unwrap(),
            answer: PtText::parse("é").unwrap(),
            base: Some("ser".into()),
            instruction: String::new(),
            translation: HeText::parse("היא רופאה.").unwrap(),
        }
        .into()
    }

    #[test]
    fn answer_face_appears_only_after_reveal() {
        let pool = Pool::uncategorized(vec![sentence()]);
        let mut session = QuizSession::direct(pool, DeckFilter::all(), fixed_random()).unwrap();

        let view = session.view();
        assert_eq!(view.phase, Phase::Quiz);
        assert_eq!(view.prompt.as_ref().map(|f| f.text.as_ref()), Some("Ela ___ médica."));
        assert!(view.answer.is_none());
        assert!(view.results.is_none());

        let Step::Pending(ticket) = session.reveal().unwrap() else {
            panic!("reveal was not gated");
        };
        assert!(session.view().transitioning);
        session.complete_transition(ticket).unwrap();

        let view = session.view();
        let answer = view.answer.unwrap();
        assert_eq!(answer.lang, Lang::Pt);
        assert_eq!(answer.text, "Ela é médica.");
        assert_eq!(answer.hints, vec![Hint::Translation("היא רופאה.")]);
    }

    #[test]
    fn results_view_reports_score() {
        let pool = Pool::uncategorized(vec![sentence()]);
        let mut session = QuizSession::direct(pool, DeckFilter::all(), fixed_random()).unwrap();
        if let Step::Pending(ticket) = session.reveal().unwrap() {
            session.complete_transition(ticket).unwrap();
        }
        session.judge(false).unwrap();

        let view = session.view();
        assert!(view.prompt.is_none());
        assert_eq!(view.progress_percent, 100);
        let results = view.results.unwrap();
        assert_eq!(results.score.percent(), 0);
        assert!(results.can_practice_missed);
        assert_eq!(results.praise, None);
    }
}
