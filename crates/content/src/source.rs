use std::fmt;
use std::path::PathBuf;

use estrela_core::model::{Category, CategoryId, GrammarTopic, Song, SongId, TopicId};
use thiserror::Error;

/// Which collection a lookup targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Category,
    Topic,
    Song,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentKind::Category => "category",
            ContentKind::Topic => "grammar topic",
            ContentKind::Song => "song",
        })
    }
}

/// Errors surfaced by content sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: ContentKind, id: String },

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: ContentKind, id: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {file}: {source}")]
    Json {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only access to the bundled study content.
///
/// Lookups by id fail with `ContentError::NotFound`; listings are in content
/// order.
pub trait ContentSource: Send + Sync {
    fn categories(&self) -> &[Category];

    fn topics(&self) -> &[GrammarTopic];

    fn songs(&self) -> &[Song];

    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no category has this id.
    fn category(&self, id: &CategoryId) -> Result<&Category, ContentError> {
        self.categories()
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| ContentError::NotFound {
                kind: ContentKind::Category,
                id: id.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no topic has this id.
    fn topic(&self, id: &TopicId) -> Result<&GrammarTopic, ContentError> {
        self.topics()
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| ContentError::NotFound {
                kind: ContentKind::Topic,
                id: id.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no song has this id.
    fn song(&self, id: &SongId) -> Result<&Song, ContentError> {
        self.songs()
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| ContentError::NotFound {
                kind: ContentKind::Song,
                id: id.to_string(),
            })
    }
}
