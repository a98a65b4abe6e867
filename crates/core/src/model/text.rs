use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("text must not be empty")]
    Empty,
}

/// The two languages baked into the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Portuguese, the language being studied.
    Pt,
    /// Hebrew, the learner's language.
    He,
}

impl Lang {
    /// Returns the other language.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Lang::Pt => Lang::He,
            Lang::He => Lang::Pt,
        }
    }

    /// BCP-47 tag, useful for presentation layers.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Lang::Pt => "pt",
            Lang::He => "he",
        }
    }

    /// Hebrew is written right to left.
    #[must_use]
    pub fn is_rtl(self) -> bool {
        matches!(self, Lang::He)
    }
}

pub trait Language {
    const LANG: Lang;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pt;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct He;

impl Language for Pt {
    const LANG: Lang = Lang::Pt;
}

impl Language for He {
    const LANG: Lang = Lang::He;
}

/// Non-empty text tagged with its language at the type level.
#[derive(Clone, PartialEq, Eq)]
pub struct Text<L>(String, PhantomData<L>);

pub type PtText = Text<Pt>;
pub type HeText = Text<He>;

impl<L: Language> Text<L> {
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input.
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(s, PhantomData))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn lang(&self) -> Lang {
        L::LANG
    }
}

impl<L: Language> fmt::Debug for Text<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", L::LANG.tag(), self.0)
    }
}

impl<L: Language> fmt::Display for Text<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<L> Serialize for Text<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, L: Language> Deserialize<'de> for Text<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(PtText::parse("   ").unwrap_err(), TextError::Empty);
        assert_eq!(HeText::parse("שלום").unwrap().lang(), Lang::He);
    }

    #[test]
    fn lang_other_flips() {
        assert_eq!(Lang::Pt.other(), Lang::He);
        assert!(Lang::He.is_rtl());
        assert!(!Lang::Pt.is_rtl());
    }
}
