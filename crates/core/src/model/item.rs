use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::model::text::{HeText, Lang, PtText};

/// Placeholder marking the gap in a fill-in-the-blank sentence.
pub const BLANK: &str = "___";

//
// ─── DIRECTION ─────────────────────────────────────────────────────────────────
//

/// Which side of a word pair is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ask in Portuguese, answer in Hebrew.
    #[default]
    PtToHe,
    /// Ask in Hebrew, answer in Portuguese.
    HeToPt,
}

impl Direction {
    /// Maps a fair coin to a direction (`true` asks in Portuguese).
    #[must_use]
    pub fn from_coin(heads: bool) -> Self {
        if heads { Self::PtToHe } else { Self::HeToPt }
    }

    #[must_use]
    pub fn prompt_lang(self) -> Lang {
        match self {
            Direction::PtToHe => Lang::Pt,
            Direction::HeToPt => Lang::He,
        }
    }

    #[must_use]
    pub fn answer_lang(self) -> Lang {
        self.prompt_lang().other()
    }
}

//
// ─── FACES ─────────────────────────────────────────────────────────────────────
//

/// Secondary text shown next to a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint<'a> {
    /// Dictionary form of the word to conjugate.
    BaseForm(&'a str),
    /// What the learner is asked to do.
    Instruction(&'a str),
    /// Translation shown once the answer is revealed.
    Translation(&'a str),
}

impl Hint<'_> {
    #[must_use]
    pub fn lang(&self) -> Lang {
        match self {
            Hint::BaseForm(_) => Lang::Pt,
            Hint::Instruction(_) | Hint::Translation(_) => Lang::He,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Hint::BaseForm(s) | Hint::Instruction(s) | Hint::Translation(s) => s,
        }
    }
}

/// One side of a card, ready for a presentation layer to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face<'a> {
    pub lang: Lang,
    pub text: Cow<'a, str>,
    pub hints: Vec<Hint<'a>>,
}

impl<'a> Face<'a> {
    #[must_use]
    pub fn plain(lang: Lang, text: &'a str) -> Self {
        Self {
            lang,
            text: Cow::Borrowed(text),
            hints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: Hint<'a>) -> Self {
        self.hints.push(hint);
        self
    }
}

//
// ─── FLASHCARD CAPABILITY ──────────────────────────────────────────────────────
//

/// Minimal capability the session engine needs from an item.
pub trait Flashcard: Clone {
    /// The side shown before reveal.
    fn prompt(&self) -> Face<'_>;

    /// The side shown after reveal.
    fn answer(&self) -> Face<'_>;

    /// Presentation direction, for items that can be asked either way.
    fn direction(&self) -> Option<Direction> {
        None
    }

    /// Sets the presentation direction. Items with a fixed orientation ignore it.
    fn orient(&mut self, _direction: Direction) {}
}

//
// ─── VARIANTS ──────────────────────────────────────────────────────────────────
//

/// A vocabulary word from a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabWord {
    pub pt: PtText,
    pub he: HeText,
    #[serde(skip)]
    pub direction: Direction,
}

/// A fill-in-the-blank sentence from a grammar topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarSentence {
    pub blank_pt: PtText,
    pub answer: PtText,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub instruction: String,
    pub translation: HeText,
}

/// A word taken from a song's lyrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongWord {
    pub pt: PtText,
    pub he: HeText,
    #[serde(skip)]
    pub direction: Direction,
}

/// A full lyric line with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSentence {
    pub pt: PtText,
    pub he: HeText,
}

fn word_face<'a>(pt: &'a PtText, he: &'a HeText, lang: Lang) -> Face<'a> {
    match lang {
        Lang::Pt => Face::plain(Lang::Pt, pt.as_str()),
        Lang::He => Face::plain(Lang::He, he.as_str()),
    }
}

impl VocabWord {
    #[must_use]
    pub fn new(pt: PtText, he: HeText) -> Self {
        Self {
            pt,
            he,
            direction: Direction::default(),
        }
    }
}

impl Flashcard for VocabWord {
    fn prompt(&self) -> Face<'_> {
        word_face(&self.pt, &self.he, self.direction.prompt_lang())
    }

    fn answer(&self) -> Face<'_> {
        word_face(&self.pt, &self.he, self.direction.answer_lang())
    }

    fn direction(&self) -> Option<Direction> {
        Some(self.direction)
    }

    fn orient(&mut self, direction: Direction) {
        self.direction = direction;
    }
}

impl SongWord {
    #[must_use]
    pub fn new(pt: PtText, he: HeText) -> Self {
        Self {
            pt,
            he,
            direction: Direction::default(),
        }
    }
}

impl Flashcard for SongWord {
    fn prompt(&self) -> Face<'_> {
        word_face(&self.pt, &self.he, self.direction.prompt_lang())
    }

    fn answer(&self) -> Face<'_> {
        word_face(&self.pt, &self.he, self.direction.answer_lang())
    }

    fn direction(&self) -> Option<Direction> {
        Some(self.direction)
    }

    fn orient(&mut self, direction: Direction) {
        self.direction = direction;
    }
}

impl GrammarSentence {
    /// The sentence with the first blank replaced by the answer.
    ///
    /// A sentence without a blank is returned unchanged.
    #[must_use]
    pub fn filled(&self) -> Cow<'_, str> {
        let sentence = self.blank_pt.as_str();
        match sentence.split_once(BLANK) {
            Some((before, after)) => {
                Cow::Owned(format!("{before}{}{after}", self.answer.as_str()))
            }
            None => Cow::Borrowed(sentence),
        }
    }
}

impl Flashcard for GrammarSentence {
    fn prompt(&self) -> Face<'_> {
        let mut face = Face::plain(Lang::Pt, self.blank_pt.as_str());
        if let Some(base) = self.base.as_deref().filter(|b| !b.trim().is_empty()) {
            face = face.with_hint(Hint::BaseForm(base));
        }
        if !self.instruction.trim().is_empty() {
            face = face.with_hint(Hint::Instruction(&self.instruction));
        }
        face
    }

    fn answer(&self) -> Face<'_> {
        Face {
            lang: Lang::Pt,
            text: self.filled(),
            hints: vec![Hint::Translation(self.translation.as_str())],
        }
    }
}

impl Flashcard for SongSentence {
    fn prompt(&self) -> Face<'_> {
        Face::plain(Lang::Pt, self.pt.as_str())
    }

    fn answer(&self) -> Face<'_> {
        Face::plain(Lang::Pt, self.pt.as_str()).with_hint(Hint::Translation(self.he.as_str()))
    }
}

//
// ─── QUIZ ITEM ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    VocabWord,
    GrammarSentence,
    SongWord,
    SongSentence,
}

/// Any unit of study content the engine can quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizItem {
    VocabWord(VocabWord),
    GrammarSentence(GrammarSentence),
    SongWord(SongWord),
    SongSentence(SongSentence),
}

impl QuizItem {
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            QuizItem::VocabWord(_) => ItemKind::VocabWord,
            QuizItem::GrammarSentence(_) => ItemKind::GrammarSentence,
            QuizItem::SongWord(_) => ItemKind::SongWord,
            QuizItem::SongSentence(_) => ItemKind::SongSentence,
        }
    }

    fn card(&self) -> &dyn FlashcardFaces {
        match self {
            QuizItem::VocabWord(w) => w,
            QuizItem::GrammarSentence(s) => s,
            QuizItem::SongWord(w) => w,
            QuizItem::SongSentence(s) => s,
        }
    }
}

// Object-safe subset of `Flashcard`, used to delegate from `QuizItem`.
trait FlashcardFaces {
    fn prompt_face(&self) -> Face<'_>;
    fn answer_face(&self) -> Face<'_>;
    fn current_direction(&self) -> Option<Direction>;
}

impl<T: Flashcard> FlashcardFaces for T {
    fn prompt_face(&self) -> Face<'_> {
        self.prompt()
    }

    fn answer_face(&self) -> Face<'_> {
        self.answer()
    }

    fn current_direction(&self) -> Option<Direction> {
        self.direction()
    }
}

impl Flashcard for QuizItem {
    fn prompt(&self) -> Face<'_> {
        self.card().prompt_face()
    }

    fn answer(&self) -> Face<'_> {
        self.card().answer_face()
    }

    fn direction(&self) -> Option<Direction> {
        self.card().current_direction()
    }

    fn orient(&mut self, direction: Direction) {
        match self {
            QuizItem::VocabWord(w) => w.orient(direction),
            QuizItem::SongWord(w) => w.orient(direction),
            QuizItem::GrammarSentence(_) | QuizItem::SongSentence(_) => {}
        }
    }
}

impl From<VocabWord> for QuizItem {
    fn from(value: VocabWord) -> Self {
        Self::VocabWord(value)
    }
}

impl From<GrammarSentence> for QuizItem {
    fn from(value: GrammarSentence) -> Self {
        Self::GrammarSentence(value)
    }
}

impl From<SongWord> for QuizItem {
    fn from(value: SongWord) -> Self {
        Self::SongWord(value)
    }
}

impl From<SongSentence> for QuizItem {
    fn from(value: SongSentence) -> Self {
        Self::SongSentence(value)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn word() -> VocabWord {
        VocabWord::new(PtText::parse("casa").unwrap(), HeText::parse("בית").unwrap())
    }

    fn sentence() -> GrammarSentence {
        GrammarSentence {
            blank_pt: PtText::parse("Eu ___ cansado.").unwrap(),
            answer: PtText::parse("estou").unwrap(),
            base: Some("estar".into()),
            instruction: "השלימו את הפועל".into(),
            translation: HeText::parse("אני עייף.").unwrap(),
        }
    }

    #[test]
    fn direction_selects_prompt_language() {
        let mut w = word();
        assert_eq!(w.prompt().text, "casa");
        assert_eq!(w.answer().lang, Lang::He);

        w.orient(Direction::HeToPt);
        assert_eq!(w.prompt().text, "בית");
        assert_eq!(w.answer().text, "casa");
    }

    #[test]
    fn grammar_answer_fills_the_blank() {
        let s = sentence();
        assert_eq!(s.prompt().text, "Eu ___ cansado.");
        assert_eq!(
            s.prompt().hints,
            vec![Hint::BaseForm("estar"), Hint::Instruction("השלימו את הפועל")]
        );
        let answer = s.answer();
        assert_eq!(answer.text, "Eu estou cansado.");
        assert_eq!(answer.hints, vec![Hint::Translation("אני עייף.")]);
    }

    #[test]
    fn grammar_without_blank_is_unchanged() {
        let mut s = sentence();
        s.blank_pt = PtText::parse("Sem lacuna").unwrap();
        assert_eq!(s.filled(), "Sem lacuna");
    }

    #[test]
    fn quiz_item_delegates_and_ignores_orientation_for_sentences() {
        let mut item = QuizItem::from(sentence());
        item.orient(Direction::HeToPt);
        assert_eq!(item.direction(), None);
        assert_eq!(item.kind(), ItemKind::GrammarSentence);

        let mut item = QuizItem::from(word());
        item.orient(Direction::HeToPt);
        assert_eq!(item.direction(), Some(Direction::HeToPt));
        assert_eq!(item.prompt().lang, Lang::He);
    }

    #[test]
    fn vocab_word_deserializes_without_direction() {
        let w: VocabWord = serde_json::from_str(r#"{"pt":"gato","he":"חתול"}"#).unwrap();
        assert_eq!(w.direction, Direction::PtToHe);
        assert!(serde_json::from_str::<VocabWord>(r#"{"pt":"","he":"x"}"#).is_err());
    }
}
