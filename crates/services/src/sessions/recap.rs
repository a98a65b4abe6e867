use estrela_core::model::Flashcard;
use tracing::{debug, info};

use super::service::{Phase, QuizSession, Step};

/// Cards carried into the next recap pass once the last card is judged.
///
/// Only the final card's judgment shrinks the deck: a correct final card is
/// dropped, everything else (including earlier cards judged correct in this
/// pass) is kept.
#[must_use]
pub fn remaining_after_pass<T>(mut deck: Vec<T>, position: usize, correct: bool) -> Vec<T> {
    if correct && position < deck.len() {
        deck.remove(position);
    }
    deck
}

impl<T: Flashcard> QuizSession<T> {
    pub(super) fn begin_recap(&mut self, mut items: Vec<T>) {
        self.rng.shuffle(&mut items);
        self.lock.clear();
        self.deck = items;
        self.position = 0;
        self.revealed = false;
        self.phase = Phase::Recap;
        self.recap_pass += 1;
        info!(pass = self.recap_pass, cards = self.deck.len(), "recap started");
    }

    pub(super) fn finish_recap_pass(&mut self, correct: bool) -> Step {
        let deck = std::mem::take(&mut self.deck);
        let remaining = remaining_after_pass(deck, self.position, correct);
        debug!(pass = self.recap_pass, remaining = remaining.len(), "recap pass done");
        if remaining.is_empty() {
            Step::Finished(self.enter_results())
        } else {
            self.begin_recap(remaining);
            Step::Applied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::sessions::plan::Pool;
    use estrela_core::model::{DeckFilter, HeText, PtText, QuizItem, VocabWord};
    use estrela_core::random::fixed_random;
    use proptest::prelude::*;

    fn word(pt: &str) -> QuizItem {
        VocabWord::new(PtText::parse(pt).unwrap(), HeText::parse("מילה").unwrap()).into()
    }

    fn session(words: &[&str]) -> QuizSession {
        let pool = Pool::uncategorized(words.iter().map(|w| word(w)));
        QuizSession::direct(pool, DeckFilter::all(), fixed_random()).unwrap()
    }

    fn answer(session: &mut QuizSession, correct: bool) -> Step {
        if let Step::Pending(ticket) = session.reveal().unwrap() {
            session.complete_transition(ticket).unwrap();
        }
        let step = session.judge(correct).unwrap();
        if let Step::Pending(ticket) = step {
            session.complete_transition(ticket).unwrap();
        }
        step
    }

    #[test]
    fn final_card_decides_what_remains() {
        assert_eq!(remaining_after_pass(vec![1, 2, 3], 2, true), vec![1, 2]);
        assert_eq!(remaining_after_pass(vec![1, 2, 3], 2, false), vec![1, 2, 3]);
        assert!(remaining_after_pass(vec![7], 0, true).is_empty());
    }

    #[test]
    fn two_card_recap_shrinks_then_finishes() {
        let mut s = session(&["casa", "porta"]);
        answer(&mut s, false);
        answer(&mut s, false);
        assert_eq!(s.phase(), Phase::Results);
        assert_eq!(s.missed().len(), 2);

        s.practice_missed().unwrap();
        assert_eq!((s.phase(), s.pass_len(), s.recap_pass()), (Phase::Recap, 2, 1));

        answer(&mut s, false);
        assert_eq!(answer(&mut s, true), Step::Applied);
        assert_eq!((s.phase(), s.pass_len(), s.recap_pass()), (Phase::Recap, 1, 2));
        assert_eq!(s.progress().position, 0);

        let step = answer(&mut s, true);
        assert!(matches!(step, Step::Finished(_)));
        assert_eq!(s.phase(), Phase::Results);
    }

    #[test]
    fn recap_never_touches_the_score() {
        let mut s = session(&["casa", "porta", "mesa"]);
        answer(&mut s, true);
        answer(&mut s, false);
        answer(&mut s, false);
        let before = s.score();

        s.practice_missed().unwrap();
        while s.phase() == Phase::Recap {
            answer(&mut s, true);
        }
        assert_eq!(s.recap_pass(), 2);
        assert_eq!(s.score(), before);
        assert_eq!(s.missed().len(), 2);

        // the scored pass's misses are still there to practice
        s.practice_missed().unwrap();
        assert_eq!(s.pass_len(), 2);
    }

    #[test]
    fn recap_actions_are_gated_like_quiz() {
        let mut s = session(&["casa", "porta"]);
        answer(&mut s, false);
        answer(&mut s, false);
        s.practice_missed().unwrap();
        assert_eq!(s.judge(true), Err(SessionError::NotRevealed));
        let Step::Pending(flip) = s.reveal().unwrap() else {
            panic!("reveal was not gated");
        };
        assert_eq!(s.reveal().unwrap(), Step::Dropped);
        s.complete_transition(flip).unwrap();
        assert!(s.is_revealed());
    }

    proptest! {
        #[test]
        fn recap_converges_when_final_cards_are_known(
            misses in 1usize..8,
            wrong_passes in 0usize..4,
        ) {
            let words: Vec<String> = (0..misses).map(|i| format!("palavra{i}")).collect();
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            let mut s = session(&refs);
            for _ in 0..misses {
                answer(&mut s, false);
            }
            s.practice_missed().unwrap();

            // a few fully wrong passes keep the deck intact
            for _ in 0..wrong_passes {
                for _ in 0..misses {
                    answer(&mut s, false);
                }
                prop_assert_eq!(s.pass_len(), misses);
            }

            let mut passes = 0;
            while s.phase() == Phase::Recap {
                let len = s.pass_len();
                for _ in 0..len {
                    answer(&mut s, true);
                }
                passes += 1;
                prop_assert!(passes <= misses);
            }
            prop_assert_eq!(s.phase(), Phase::Results);
            prop_assert_eq!(passes, misses);
        }
    }
}
