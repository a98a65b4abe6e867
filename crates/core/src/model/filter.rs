use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::ids::CategoryId;

/// Cap on the number of items in a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Limit {
    #[default]
    All,
    Count(usize),
}

impl Limit {
    /// Number of items a pool of `available` yields under this limit.
    ///
    /// A limit never expands the pool.
    #[must_use]
    pub fn apply(self, available: usize) -> usize {
        match self {
            Limit::All => available,
            Limit::Count(n) => n.min(available),
        }
    }

    /// A count option is usable only when the pool can fill it.
    #[must_use]
    pub fn fits(self, available: usize) -> bool {
        match self {
            Limit::All => true,
            Limit::Count(n) => n <= available,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::All => f.write_str("all"),
            Limit::Count(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid limit {0:?}: expected a count or \"all\"")]
pub struct ParseLimitError(String);

impl FromStr for Limit {
    type Err = ParseLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Limit::All);
        }
        trimmed
            .parse::<usize>()
            .map(Limit::Count)
            .map_err(|_| ParseLimitError(s.to_owned()))
    }
}

/// Which part of a pool a deck is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckFilter {
    /// `None` keeps every entry.
    pub categories: Option<BTreeSet<CategoryId>>,
    pub limit: Limit,
}

impl DeckFilter {
    /// Everything, uncapped.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = CategoryId>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = limit;
        self
    }

    /// Whether an entry tagged with `category` passes the category filter.
    ///
    /// Untagged entries only pass an unfiltered deck.
    #[must_use]
    pub fn admits(&self, category: Option<&CategoryId>) -> bool {
        match (&self.categories, category) {
            (None, _) => true,
            (Some(selected), Some(category)) => selected.contains(category),
            (Some(_), None) => false,
        }
    }
}
