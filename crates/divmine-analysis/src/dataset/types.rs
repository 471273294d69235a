//! Transactions, datasets and patterns.

use std::fmt;

use divmine_core::types::collections::{FxHashSet, SmallVec4};

/// Whitespace-free, non-empty item tokens of `items`.
fn tokens<I, S>(items: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().flat_map(|item| {
        item.as_ref()
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>()
    })
}

/// An unordered set of item identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    items: FxHashSet<String>,
}

impl Transaction {
    /// Build a transaction from item tokens; duplicates collapse.
    ///
    /// Tokens are split on whitespace and blank tokens dropped.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            items: tokens(items).collect(),
        }
    }

    /// Parse a whitespace-separated line of items.
    pub fn parse(line: &str) -> Self {
        Self::new(line.split_whitespace())
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Transactions in file order. Transaction `k` (0-based) has index `k + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    transactions: Vec<Transaction>,
}

impl Dataset {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Number of transactions `N`.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Iterate `(index, transaction)` with 1-based indices.
    pub fn indexed(&self) -> impl Iterator<Item = (u32, &Transaction)> {
        self.transactions
            .iter()
            .enumerate()
            .map(|(pos, tx)| (pos as u32 + 1, tx))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl FromIterator<Transaction> for Dataset {
    fn from_iter<T: IntoIterator<Item = Transaction>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A conjunction of items, kept in input order.
///
/// The empty pattern matches every transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pattern {
    items: SmallVec4<String>,
}

impl Pattern {
    /// Tokens are split on whitespace and blank tokens dropped, so an item
    /// never contains whitespace and is never empty.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            items: tokens(items).collect(),
        }
    }

    /// Parse a whitespace-separated pattern; a blank string is the empty pattern.
    pub fn parse(text: &str) -> Self {
        Self::new(text.split_whitespace())
    }

    /// The matches-all pattern.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cache key: items joined by single spaces.
    ///
    /// Items are non-empty and whitespace-free (see [`Pattern::new`]), so
    /// the empty key, single-item keys and multi-item keys never collide.
    pub fn key(&self) -> String {
        self.items.join(" ")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.items.join(" "))
    }
}
