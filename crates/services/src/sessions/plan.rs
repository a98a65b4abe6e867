use std::collections::HashSet;

use estrela_core::RandomSource;
use estrela_core::model::{CategoryId, DeckFilter, Direction, Flashcard, Limit};
use tracing::debug;

use crate::error::DeckError;

/// One item of a pool with the category it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry<T> {
    pub category: Option<CategoryId>,
    pub item: T,
}

/// Everything a session may draw from, in content order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool<T> {
    entries: Vec<PoolEntry<T>>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Pool<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool whose items belong to no category (a grammar topic, a song).
    #[must_use]
    pub fn uncategorized(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            entries: items
                .into_iter()
                .map(|item| PoolEntry {
                    category: None,
                    item,
                })
                .collect(),
        }
    }

    /// Append a category's items.
    pub fn extend_category(&mut self, category: &CategoryId, items: impl IntoIterator<Item = T>) {
        self.entries.extend(items.into_iter().map(|item| PoolEntry {
            category: Some(category.clone()),
            item,
        }));
    }

    #[must_use]
    pub fn entries(&self) -> &[PoolEntry<T>] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&CategoryId> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter_map(|e| e.category.as_ref())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    #[must_use]
    pub fn contains_category(&self, category: &CategoryId) -> bool {
        self.entries
            .iter()
            .any(|e| e.category.as_ref() == Some(category))
    }

    /// Number of entries the filter's categories admit, before the limit.
    #[must_use]
    pub fn eligible(&self, filter: &DeckFilter) -> usize {
        self.entries
            .iter()
            .filter(|e| filter.admits(e.category.as_ref()))
            .count()
    }
}

/// Draw a randomized deck from `pool`.
///
/// Admitted entries are shuffled as a whole, truncated to the limit, and every
/// orientable item then gets its own coin-flip direction. A `Count(0)` limit
/// yields an empty deck.
///
/// # Errors
///
/// Returns `DeckError::EmptyPool` if the filter admits nothing while the limit
/// asks for at least one item.
pub fn build_deck<T: Flashcard>(
    pool: &Pool<T>,
    filter: &DeckFilter,
    rng: &mut RandomSource,
) -> Result<Vec<T>, DeckError> {
    let mut deck: Vec<T> = pool
        .entries
        .iter()
        .filter(|e| filter.admits(e.category.as_ref()))
        .map(|e| e.item.clone())
        .collect();

    let take = filter.limit.apply(deck.len());
    if deck.is_empty() && filter.limit != Limit::Count(0) {
        return Err(DeckError::EmptyPool);
    }

    rng.shuffle(&mut deck);
    deck.truncate(take);

    for item in &mut deck {
        if item.direction().is_some() {
            item.orient(Direction::from_coin(rng.coin()));
        }
    }

    debug!(
        pool = pool.len(),
        limit = %filter.limit,
        drawn = deck.len(),
        "built deck"
    );
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use estrela_core::model::{HeText, PtText, QuizItem, SongSentence, VocabWord};
    use estrela_core::random::fixed_random;

    fn cat(s: &str) -> CategoryId {
        CategoryId::new(s).unwrap()
    }

    fn word(pt: &str) -> QuizItem {
        VocabWord::new(PtText::parse(pt).unwrap(), HeText::parse("מילה").unwrap()).into()
    }

    fn pool() -> Pool<QuizItem> {
        let mut pool = Pool::new();
        pool.extend_category(&cat("food"), ["pão", "água", "queijo"].map(word));
        pool.extend_category(&cat("home"), ["casa", "porta"].map(word));
        pool
    }

    fn pt_of(item: &QuizItem) -> String {
        match item {
            QuizItem::VocabWord(w) => w.pt.as_str().to_owned(),
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn filters_by_category() {
        let filter = DeckFilter::all().with_categories([cat("home")]);
        let deck = build_deck(&pool(), &filter, &mut fixed_random()).unwrap();
        let mut words: Vec<_> = deck.iter().map(pt_of).collect();
        words.sort();
        assert_eq!(words, vec!["casa", "porta"]);
    }

    #[test]
    fn limit_larger_than_pool_returns_everything() {
        let filter = DeckFilter::all().with_limit(Limit::Count(10));
        let deck = build_deck(&pool(), &filter, &mut fixed_random()).unwrap();
        assert_eq!(deck.len(), 5);
    }

    #[test]
    fn empty_filtered_pool_is_rejected() {
        let filter = DeckFilter::all()
            .with_categories(Vec::<CategoryId>::new())
            .with_limit(Limit::Count(5));
        let err = build_deck(&pool(), &filter, &mut fixed_random()).unwrap_err();
        assert_eq!(err, DeckError::EmptyPool);
    }

    #[test]
    fn zero_limit_yields_empty_deck() {
        let filter = DeckFilter::all().with_limit(Limit::Count(0));
        let deck = build_deck(&pool(), &filter, &mut fixed_random()).unwrap();
        assert!(deck.is_empty());
    }

    #[test]
    fn same_seed_same_deck() {
        let filter = DeckFilter::all();
        let a = build_deck(&pool(), &filter, &mut fixed_random()).unwrap();
        let b = build_deck(&pool(), &filter, &mut fixed_random()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sentences_keep_fixed_orientation() {
        let sentence: QuizItem = SongSentence {
            pt: PtText::parse("É o fim").unwrap(),
            he: HeText::parse("זה הסוף").unwrap(),
        }
        .into();
        let pool = Pool::uncategorized(vec![sentence.clone()]);
        let deck = build_deck(&pool, &DeckFilter::all(), &mut fixed_random()).unwrap();
        assert_eq!(deck, vec![sentence]);
    }

    #[test]
    fn categories_are_listed_once_in_order() {
        let pool = pool();
        assert_eq!(pool.categories(), vec![&cat("food"), &cat("home")]);
        assert!(pool.contains_category(&cat("home")));
        assert!(!pool.contains_category(&cat("family")));
        assert_eq!(pool.eligible(&DeckFilter::all().with_categories([cat("food")])), 3);
    }
}
