use thiserror::Error;

use crate::random::RandomSource;

/// Lowest percentage in the `High` tier; also the celebration threshold.
pub const HIGH_THRESHOLD: u8 = 70;
/// Lowest percentage in the `Mid` tier.
pub const MID_THRESHOLD: u8 = 40;

//
// ─── TIER ──────────────────────────────────────────────────────────────────────
//

/// Feedback category derived from a session's percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Perfect,
    High,
    Mid,
    Low,
}

impl Tier {
    /// Thresholds are inclusive lower bounds, checked from the top.
    #[must_use]
    pub fn from_percent(percent: u8) -> Self {
        if percent >= 100 {
            Tier::Perfect
        } else if percent >= HIGH_THRESHOLD {
            Tier::High
        } else if percent >= MID_THRESHOLD {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    /// How loudly a results screen at this tier should celebrate, if at all.
    #[must_use]
    pub fn celebration(self) -> Option<Intensity> {
        match self {
            Tier::Perfect => Some(Intensity::Full),
            Tier::High => Some(Intensity::Standard),
            Tier::Mid | Tier::Low => None,
        }
    }
}

/// Strength of the cosmetic celebration on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Standard,
    Full,
}

impl Intensity {
    /// Particle count a confetti-style effect would use.
    #[must_use]
    pub fn particle_count(self) -> u32 {
        match self {
            Intensity::Standard => 100,
            Intensity::Full => 200,
        }
    }
}

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    correct: usize,
    total: usize,
    percent: u8,
    tier: Tier,
}

impl Score {
    /// Scores `correct` out of `total`.
    ///
    /// The percentage is rounded half up. `total == 0` scores 0% rather than
    /// dividing by zero. `correct` is capped at `total`.
    #[must_use]
    pub fn new(correct: usize, total: usize) -> Self {
        let correct = correct.min(total);
        let percent = if total == 0 {
            0
        } else {
            let (c, t) = (correct as u128, total as u128);
            // c <= t, so the quotient is at most 100
            u8::try_from((200 * c + t) / (2 * t)).unwrap_or(100)
        };
        Self {
            correct,
            total,
            percent,
            tier: Tier::from_percent(percent),
        }
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn celebration(&self) -> Option<Intensity> {
        self.tier.celebration()
    }
}

/// Shorthand for [`Score::new`].
#[must_use]
pub fn score(correct: usize, total: usize) -> Score {
    Score::new(correct, total)
}

//
// ─── PRAISE ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PraiseError {
    #[error("praise pool for {0:?} is empty")]
    EmptyPool(Tier),
}

/// Candidate phrases per tier. One is picked uniformly for the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PraiseBook {
    perfect: Vec<String>,
    high: Vec<String>,
    mid: Vec<String>,
    low: Vec<String>,
}

impl PraiseBook {
    /// # Errors
    ///
    /// Returns `PraiseError::EmptyPool` if any tier has no phrases.
    pub fn new(
        perfect: Vec<String>,
        high: Vec<String>,
        mid: Vec<String>,
        low: Vec<String>,
    ) -> Result<Self, PraiseError> {
        for (tier, pool) in [
            (Tier::Perfect, &perfect),
            (Tier::High, &high),
            (Tier::Mid, &mid),
            (Tier::Low, &low),
        ] {
            if pool.is_empty() {
                return Err(PraiseError::EmptyPool(tier));
            }
        }
        Ok(Self {
            perfect,
            high,
            mid,
            low,
        })
    }

    #[must_use]
    pub fn phrases(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Perfect => &self.perfect,
            Tier::High => &self.high,
            Tier::Mid => &self.mid,
            Tier::Low => &self.low,
        }
    }

    /// Picks a phrase for the tier uniformly at random.
    pub fn pick(&self, tier: Tier, rng: &mut RandomSource) -> &str {
        rng.pick(self.phrases(tier)).map_or("", String::as_str)
    }
}

impl Default for PraiseBook {
    fn default() -> Self {
        fn owned(phrases: &[&str]) -> Vec<String> {
            phrases.iter().map(|p| (*p).to_owned()).collect()
        }
        Self {
            perfect: owned(&["מושלם לגמרי!", "מדהים!", "פנומנלי!"]),
            high: owned(&["כל הכבוד!", "עבודה מצוינת!", "אחלה תוצאה!"]),
            mid: owned(&["יפה מאוד!", "עבודה טובה!", "ממשיכים להתקדם!"]),
            low: owned(&["המשך להתאמן!", "בפעם הבאה יהיה טוב יותר!", "כל ניסיון מקדם אותך!"]),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
