//! Lesson content records as they ship in the bundled data files.
//!
//! Only the quiz items feed the session engine; the rest is carried so a
//! catalog can be listed and browsed.

mod grammar;
mod song;
mod vocab;

pub use grammar::{Example, ExplanationBlock, GrammarTopic};
pub use song::{GrammarNote, LyricLine, Song};
pub use vocab::Category;
