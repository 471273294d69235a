//! Pairwise similarity table keyed by unordered pattern pairs.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use divmine_core::errors::DatasetError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unordered pair of 0-based pattern positions, stored as `row > col`.
///
/// Renders as `"row-col"`, the key format of pairwise files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    row: usize,
    col: usize,
}

impl PairKey {
    /// Normalizes the order; `None` for `i == j`.
    pub fn new(i: usize, j: usize) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Greater => Some(Self { row: i, col: j }),
            std::cmp::Ordering::Less => Some(Self { row: j, col: i }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl FromStr for PairKey {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DatasetError::InvalidPairKey(s.to_string());
        let (i, j) = s.split_once('-').ok_or_else(invalid)?;
        let i: usize = i.trim().parse().map_err(|_| invalid())?;
        let j: usize = j.trim().parse().map_err(|_| invalid())?;
        PairKey::new(i, j).ok_or_else(invalid)
    }
}

/// Similarity percentage for every computed pair, ordered by `(row, col)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairwiseTable {
    entries: BTreeMap<PairKey, f64>,
}

impl PairwiseTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PairKey, similarity: f64) {
        self.entries.insert(key, similarity);
    }

    /// Similarity of patterns `i` and `j` in either order.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        PairKey::new(i, j).and_then(|key| self.entries.get(&key).copied())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PairKey, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.values().copied().collect()
    }

    /// Entries of one row, i.e. pairs `(row, j)` with `j < row`.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (PairKey, f64)> + '_ {
        let start = PairKey { row, col: 0 };
        let end = PairKey { row: row + 1, col: 0 };
        self.entries.range(start..end).map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(PairKey, f64)> for PairwiseTable {
    fn from_iter<T: IntoIterator<Item = (PairKey, f64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for PairwiseTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PairwiseTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = PairwiseTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from \"i-j\" keys to similarity percentages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = PairwiseTable::new();
                while let Some((key, value)) = access.next_entry::<String, f64>()? {
                    let key: PairKey = key
                        .parse()
                        .map_err(<A::Error as serde::de::Error>::custom)?;
                    table.insert(key, value);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
