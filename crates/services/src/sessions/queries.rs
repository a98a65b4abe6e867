use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use content::{ContentError, ContentSource};
use estrela_core::RandomSource;
use estrela_core::model::{
    CategoryId, DeckFilter, Limit, ParseIdError, QuizItem, QuizSettings, SongId, TopicId,
};
use tracing::info;

use super::plan::Pool;
use super::service::QuizSession;
use crate::error::QuizError;

/// What a session quizzes on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every vocabulary category.
    Vocabulary,
    VocabCategory(CategoryId),
    GrammarTopic(TopicId),
    SongWords(SongId),
    SongSentences(SongId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Vocabulary => f.write_str("vocab"),
            Scope::VocabCategory(id) => write!(f, "vocab:{id}"),
            Scope::GrammarTopic(id) => write!(f, "grammar:{id}"),
            Scope::SongWords(id) => write!(f, "song-words:{id}"),
            Scope::SongSentences(id) => write!(f, "song-sentences:{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseScopeError {
    #[error("unknown scope {0:?}: expected vocab, vocab:<id>, grammar:<id>, song-words:<id> or song-sentences:<id>")]
    Unknown(String),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}

impl FromStr for Scope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "vocab" {
            return Ok(Scope::Vocabulary);
        }
        let Some((kind, id)) = s.split_once(':') else {
            return Err(ParseScopeError::Unknown(s.to_owned()));
        };
        Ok(match kind {
            "vocab" => Scope::VocabCategory(id.parse()?),
            "grammar" => Scope::GrammarTopic(id.parse()?),
            "song-words" => Scope::SongWords(id.parse()?),
            "song-sentences" => Scope::SongSentences(id.parse()?),
            _ => return Err(ParseScopeError::Unknown(s.to_owned())),
        })
    }
}

/// Resolves scopes against a content source and opens sessions on them.
#[derive(Clone)]
pub struct QuizService {
    content: Arc<dyn ContentSource>,
    settings: QuizSettings,
}

impl QuizService {
    #[must_use]
    pub fn new(content: Arc<dyn ContentSource>, settings: QuizSettings) -> Self {
        Self { content, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn content(&self) -> &dyn ContentSource {
        self.content.as_ref()
    }

    /// Collects every quiz item a scope covers, in content order.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if the scope names absent content.
    pub fn pool(&self, scope: &Scope) -> Result<Pool<QuizItem>, ContentError> {
        let content = self.content.as_ref();
        Ok(match scope {
            Scope::Vocabulary => self.vocabulary_pool(),
            Scope::VocabCategory(id) => {
                let category = content.category(id)?;
                let mut pool = Pool::new();
                pool.extend_category(&category.id, category.words.iter().cloned().map(Into::into));
                pool
            }
            Scope::GrammarTopic(id) => {
                Pool::uncategorized(content.topic(id)?.sentences.iter().cloned().map(Into::into))
            }
            Scope::SongWords(id) => {
                Pool::uncategorized(content.song(id)?.vocab.iter().cloned().map(Into::into))
            }
            Scope::SongSentences(id) => {
                Pool::uncategorized(content.song(id)?.sentences.iter().cloned().map(Into::into))
            }
        })
    }

    /// The vocabulary quiz on its setup screen, all categories selected.
    #[must_use]
    pub fn setup_vocabulary(&self, rng: RandomSource) -> QuizSession {
        let filter = DeckFilter::all().with_limit(self.settings.default_limit());
        QuizSession::setup(self.vocabulary_pool(), filter, rng)
    }

    fn vocabulary_pool(&self) -> Pool<QuizItem> {
        let mut pool = Pool::new();
        for category in self.content.categories() {
            pool.extend_category(&category.id, category.words.iter().cloned().map(Into::into));
        }
        pool
    }

    /// Skips setup and quizzes the whole scope.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Content` for absent content and
    /// `QuizError::Session` if the scope has no items.
    pub fn start_direct(&self, scope: &Scope, rng: RandomSource) -> Result<QuizSession, QuizError> {
        let pool = self.pool(scope)?;
        let session = QuizSession::direct(pool, DeckFilter::all().with_limit(Limit::All), rng)?;
        info!(%scope, total = session.total(), "direct session");
        Ok(session)
    }
}
