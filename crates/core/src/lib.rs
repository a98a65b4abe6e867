#![forbid(unsafe_code)]

pub mod model;
pub mod random;
pub mod score;

pub use random::RandomSource;
pub use score::{Intensity, PraiseBook, Score, Tier, score};
