use super::service::Phase;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub phase: Phase,
    /// Zero-based index of the card on screen.
    pub position: usize,
    pub pass_len: usize,
    /// Share of the running pass already behind the learner, floored.
    pub percent: u8,
    pub correct: usize,
    pub total: usize,
}

impl SessionProgress {
    pub(crate) fn new(phase: Phase, position: usize, pass_len: usize, correct: usize, total: usize) -> Self {
        let percent = match phase {
            Phase::Results => 100,
            Phase::Setup => 0,
            Phase::Quiz | Phase::Recap if pass_len == 0 => 0,
            Phase::Quiz | Phase::Recap => {
                u8::try_from(position.min(pass_len) * 100 / pass_len).unwrap_or(100)
            }
        };
        Self {
            phase,
            position,
            pass_len,
            percent,
            correct,
            total,
        }
    }

    /// One-based card number, as shown in "3 / 10".
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.position + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_counts_cards_behind() {
        assert_eq!(SessionProgress::new(Phase::Quiz, 0, 4, 0, 4).percent, 0);
        assert_eq!(SessionProgress::new(Phase::Quiz, 3, 4, 2, 4).percent, 75);
        assert_eq!(SessionProgress::new(Phase::Recap, 1, 3, 0, 4).percent, 33);
        assert_eq!(SessionProgress::new(Phase::Results, 0, 0, 3, 4).percent, 100);
        assert_eq!(SessionProgress::new(Phase::Quiz, 2, 4, 1, 4).ordinal(), 3);
    }
}
