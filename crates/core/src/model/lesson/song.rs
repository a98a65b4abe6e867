use serde::{Deserialize, Serialize};

use crate::model::ids::{SongId, TopicId};
use crate::model::item::{SongSentence, SongWord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricLine {
    pub pt: String,
    pub he: String,
}

/// A grammar point spotted in the lyrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarNote {
    pub sentence_pt: String,
    #[serde(default)]
    pub marked_words: Vec<String>,
    pub label_he: String,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    #[serde(default)]
    pub is_new: bool,
}

impl GrammarNote {
    /// Whether a word of `sentence_pt` is one of the marked words.
    ///
    /// Punctuation is stripped and the comparison ignores case.
    #[must_use]
    pub fn is_marked(&self, word: &str) -> bool {
        let clean: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();
        !clean.is_empty()
            && self
                .marked_words
                .iter()
                .any(|marked| marked.to_lowercase() == clean)
    }

    /// Splits the sentence on spaces, pairing each word with its marked flag.
    pub fn highlighted(&self) -> impl Iterator<Item = (&str, bool)> {
        self.sentence_pt
            .split(' ')
            .map(|word| (word, self.is_marked(word)))
    }
}

/// A song lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub lyrics: Vec<Vec<LyricLine>>,
    #[serde(default)]
    pub grammar_notes: Vec<GrammarNote>,
    #[serde(default)]
    pub vocab: Vec<SongWord>,
    #[serde(default)]
    pub sentences: Vec<SongSentence>,
}

impl Song {
    /// Notes introducing new grammar, in lyric order.
    pub fn new_notes(&self) -> impl Iterator<Item = &GrammarNote> {
        self.grammar_notes.iter().filter(|n| n.is_new)
    }

    /// Notes recalling grammar seen before.
    pub fn reminder_notes(&self) -> impl Iterator<Item = &GrammarNote> {
        self.grammar_notes.iter().filter(|n| !n.is_new)
    }
}
