//! Coverage sets and pattern/cover pairs.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::dataset::Pattern;

/// Sorted, duplicate-free set of 1-based transaction indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CoverageSet {
    indices: Vec<u32>,
}

impl CoverageSet {
    /// Build from indices in any order; duplicates collapse.
    pub fn from_indices<I: IntoIterator<Item = u32>>(indices: I) -> Self {
        let mut indices: Vec<u32> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    /// `{1..=n}`, the coverage of the empty pattern.
    pub fn full(n: usize) -> Self {
        Self {
            indices: (1..=n as u32).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.indices
    }

    /// Sorted-merge intersection.
    pub fn intersection(&self, other: &CoverageSet) -> CoverageSet {
        let mut indices = Vec::with_capacity(self.len().min(other.len()));
        merge_common(&self.indices, &other.indices, |v| indices.push(v));
        CoverageSet { indices }
    }

    /// `|self ∩ other|` without allocating.
    pub fn intersection_len(&self, other: &CoverageSet) -> usize {
        let mut count = 0;
        merge_common(&self.indices, &other.indices, |_| count += 1);
        count
    }

    /// `|self ∪ other|`.
    pub fn union_len(&self, other: &CoverageSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }

    pub fn is_subset(&self, other: &CoverageSet) -> bool {
        self.len() <= other.len() && self.intersection_len(other) == self.len()
    }
}

fn merge_common(a: &[u32], b: &[u32], mut emit: impl FnMut(u32)) {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                emit(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
}

impl FromIterator<u32> for CoverageSet {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self::from_indices(iter)
    }
}

impl fmt::Display for CoverageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, index) in self.indices.iter().enumerate() {
            if pos > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// A pattern together with its computed coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternCover {
    pub pattern: Pattern,
    pub cover: Arc<CoverageSet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_indices_sorts_and_dedups() {
        let set = CoverageSet::from_indices([3, 1, 3, 2]);
        assert_eq!(set.as_slice(), &[1, 2, 3]);
        assert_eq!(set.to_string(), "1 2 3");
    }

    #[test]
    fn intersection_and_union() {
        let a = CoverageSet::from_indices([1, 3]);
        let b = CoverageSet::from_indices([1, 2]);
        assert_eq!(a.intersection(&b).as_slice(), &[1]);
        assert_eq!(a.intersection_len(&b), 1);
        assert_eq!(a.union_len(&b), 3);
    }

    #[test]
    fn subset() {
        let small = CoverageSet::from_indices([2]);
        let big = CoverageSet::full(3);
        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
        assert!(CoverageSet::default().is_subset(&small));
    }
}
