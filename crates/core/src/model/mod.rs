mod filter;
mod ids;
mod item;
pub mod lesson;
mod settings;
mod text;

pub use ids::{CategoryId, ParseIdError, SongId, TopicId};
pub use text::{He, HeText, Lang, Language, Pt, PtText, Text, TextError};

pub use filter::{DeckFilter, Limit, ParseLimitError};
pub use item::{
    BLANK, Direction, Face, Flashcard, GrammarSentence, Hint, ItemKind, QuizItem, SongSentence,
    SongWord, VocabWord,
};
pub use lesson::{Category, GrammarTopic, Song};
pub use settings::{MAX_TRANSITION_MS, QuizSettings, QuizSettingsDraft, SettingsError};
