use content::loader;
use content::{ContentError, ContentKind, ContentSource};
use estrela_core::model::{Flashcard, SongId, TopicId};

#[test]
fn load_dir_matches_bundled_files() {
    let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
    let from_disk = loader::load_dir(data_dir).expect("load content dir");
    let bundled = loader::bundled().expect("bundled content");

    assert_eq!(from_disk.categories(), bundled.categories());
    assert_eq!(from_disk.topics(), bundled.topics());
    assert_eq!(from_disk.songs(), bundled.songs());
}

#[test]
fn grammar_sentences_fill_their_blanks() {
    let catalog = loader::bundled().unwrap();
    let topic = catalog
        .topic(&TopicId::new("ser-vs-estar").unwrap())
        .unwrap();
    for sentence in &topic.sentences {
        let answer = sentence.answer();
        assert!(!answer.text.contains("___"), "unfilled: {}", answer.text);
        assert!(answer.text.contains(sentence.answer.as_str()));
    }
}

#[test]
fn song_lookup_and_not_found() {
    let catalog = loader::bundled().unwrap();
    let song = catalog
        .song(&SongId::new("aguas-de-marco").unwrap())
        .unwrap();
    assert!(!song.vocab.is_empty());
    assert!(!song.sentences.is_empty());
    assert_eq!(song.new_notes().count() + song.reminder_notes().count(), song.grammar_notes.len());

    let err = catalog.song(&SongId::new("missing").unwrap()).unwrap_err();
    assert!(matches!(err, ContentError::NotFound { kind: ContentKind::Song, .. }));
}

