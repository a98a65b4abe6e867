//! JSON loading for the content files.
//!
//! A content directory holds `vocabulary.json`, `grammar-topics.json` and
//! `songs.json`. The same three files ship inside the binary as the bundled
//! catalog.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::Catalog;
use crate::source::ContentError;

pub const VOCABULARY_FILE: &str = "vocabulary.json";
pub const GRAMMAR_FILE: &str = "grammar-topics.json";
pub const SONGS_FILE: &str = "songs.json";

const BUNDLED_VOCABULARY: &str = include_str!("../data/vocabulary.json");
const BUNDLED_GRAMMAR: &str = include_str!("../data/grammar-topics.json");
const BUNDLED_SONGS: &str = include_str!("../data/songs.json");

fn parse<T: DeserializeOwned>(file: &'static str, raw: &str) -> Result<Vec<T>, ContentError> {
    serde_json::from_str(raw).map_err(|source| ContentError::Json { file, source })
}

/// Build a catalog from the raw contents of the three files.
///
/// # Errors
///
/// Returns `ContentError::Json` for malformed or invalid records and
/// `ContentError::DuplicateId` for repeated ids.
pub fn from_json(vocabulary: &str, grammar: &str, songs: &str) -> Result<Catalog, ContentError> {
    Catalog::new(
        parse(VOCABULARY_FILE, vocabulary)?,
        parse(GRAMMAR_FILE, grammar)?,
        parse(SONGS_FILE, songs)?,
    )
}

/// The catalog compiled into the crate.
///
/// # Errors
///
/// Fails only if the bundled files are invalid.
pub fn bundled() -> Result<Catalog, ContentError> {
    from_json(BUNDLED_VOCABULARY, BUNDLED_GRAMMAR, BUNDLED_SONGS)
}

/// Load a catalog from a content directory.
///
/// # Errors
///
/// Returns `ContentError::Io` if a file cannot be read, otherwise as
/// [`from_json`].
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Catalog, ContentError> {
    let dir = dir.as_ref();
    debug!(dir = %dir.display(), "loading content");
    let read = |name: &str| {
        let path = dir.join(name);
        std::fs::read_to_string(&path).map_err(|source| ContentError::Io { path, source })
    };
    from_json(
        &read(VOCABULARY_FILE)?,
        &read(GRAMMAR_FILE)?,
        &read(SONGS_FILE)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ContentSource;

    #[test]
    fn bundled_catalog_parses() {
        let catalog = bundled().unwrap();
        assert!(!catalog.categories().is_empty());
        assert!(!catalog.topics().is_empty());
        assert!(!catalog.songs().is_empty());
        assert!(catalog.topics().iter().all(|t| !t.sentences.is_empty()));
    }

    #[test]
    fn malformed_file_names_the_file() {
        let err = from_json("[]", "{", "[]").unwrap_err();
        assert!(matches!(err, ContentError::Json { file: GRAMMAR_FILE, .. }));
    }

    #[test]
    fn blank_word_is_rejected() {
        let vocab = r#"[{"id": "x", "titleHe": "x", "words": [{"pt": " ", "he": "א"}]}]"#;
        let err = from_json(vocab, "[]", "[]").unwrap_err();
        assert!(matches!(err, ContentError::Json { file: VOCABULARY_FILE, .. }));
    }

    #[test]
    fn missing_dir_is_io_error() {
        let err = load_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }
}
