use serde::{Deserialize, Serialize};

use crate::model::ids::CategoryId;
use crate::model::item::VocabWord;

/// A vocabulary category and its words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "titleHe")]
    pub title_he: String,
    #[serde(default)]
    pub icon: String,
    pub words: Vec<VocabWord>,
}

impl Category {
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}
