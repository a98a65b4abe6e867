use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use estrela_core::model::{Category, GrammarTopic, Song};

use crate::source::{ContentError, ContentKind, ContentSource};

/// In-memory content source, cheap to clone and share.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    categories: Arc<[Category]>,
    topics: Arc<[GrammarTopic]>,
    songs: Arc<[Song]>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids within a collection.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::DuplicateId` for the first repeated id.
    pub fn new(
        categories: Vec<Category>,
        topics: Vec<GrammarTopic>,
        songs: Vec<Song>,
    ) -> Result<Self, ContentError> {
        ensure_unique(ContentKind::Category, categories.iter().map(|c| &c.id))?;
        ensure_unique(ContentKind::Topic, topics.iter().map(|t| &t.id))?;
        ensure_unique(ContentKind::Song, songs.iter().map(|s| &s.id))?;

        Ok(Self {
            categories: categories.into(),
            topics: topics.into(),
            songs: songs.into(),
        })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.topics.is_empty() && self.songs.is_empty()
    }
}

fn ensure_unique<'a, I, T>(kind: ContentKind, ids: I) -> Result<(), ContentError>
where
    I: IntoIterator<Item = &'a T>,
    T: Eq + Hash + ToString + 'a,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

impl ContentSource for Catalog {
    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn topics(&self) -> &[GrammarTopic] {
        &self.topics
    }

    fn songs(&self) -> &[Song] {
        &self.songs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estrela_core::model::{CategoryId, HeText, PtText, VocabWord};

    fn category(id: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            title_he: "קטגוריה".into(),
            icon: String::new(),
            words: vec![VocabWord::new(
                PtText::parse("sol").unwrap(),
                HeText::parse("שמש").unwrap(),
            )],
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::new(vec![category("a"), category("b")], vec![], vec![]).unwrap();
        let found = catalog.category(&CategoryId::new("b").unwrap()).unwrap();
        assert_eq!(found.id.as_str(), "b");
        assert_eq!(found.word_count(), 1);
    }

    #[test]
    fn missing_id_is_not_found() {
        let catalog = Catalog::empty();
        let err = catalog.category(&CategoryId::new("nope").unwrap()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::NotFound { kind: ContentKind::Category, ref id } if id == "nope"
        ));
        assert_eq!(err.to_string(), "category not found: nope");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![category("a"), category("a")], vec![], vec![]).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateId { .. }));
    }
}
