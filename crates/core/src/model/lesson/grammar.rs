use serde::{Deserialize, Serialize};

use crate::model::ids::TopicId;
use crate::model::item::GrammarSentence;
use crate::model::text::Lang;

/// One block of a topic's explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExplanationBlock {
    Paragraph {
        he: String,
    },
    Note {
        he: String,
    },
    Table {
        #[serde(default)]
        caption: Option<String>,
        headers: Vec<String>,
        #[serde(rename = "columnLangs")]
        column_langs: Vec<Lang>,
        rows: Vec<Vec<String>>,
    },
}

/// A worked example shown before the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub pt: String,
    pub he: String,
}

/// A grammar topic: explanation, examples and practice sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarTopic {
    pub id: TopicId,
    #[serde(rename = "titleHe")]
    pub title_he: String,
    #[serde(rename = "taglineHe", default)]
    pub tagline_he: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub explanation: Vec<ExplanationBlock>,
    #[serde(default)]
    pub examples: Vec<Example>,
    pub sentences: Vec<GrammarSentence>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explanation_blocks_deserialize_by_type() {
        let raw = r#"[
            {"type": "paragraph", "he": "הסבר"},
            {"type": "table", "headers": ["pt", "he"], "columnLangs": ["pt", "he"], "rows": [["sou", "אני"]]}
        ]"#;
        let blocks: Vec<ExplanationBlock> = serde_json::from_str(raw).unwrap();
        assert!(matches!(blocks[0], ExplanationBlock::Paragraph { .. }));
        let ExplanationBlock::Table { column_langs, caption, .. } = &blocks[1] else {
            panic!("expected table");
        };
        assert_eq!(column_langs, &vec![Lang::Pt, Lang::He]);
        assert_eq!(caption, &None);
    }
}
