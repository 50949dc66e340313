use std::collections::HashSet;

/// Identity pairs already compared during one top-level call.
///
/// Pairs are unordered: `(a, b)` and `(b, a)` are the same entry. A fresh set
/// is allocated for every top-level comparison.
#[derive(Debug, Default)]
pub struct VisitedSet {
    pairs: HashSet<(usize, usize)>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    /// Record a pair. Returns `false` if it was already present.
    pub fn insert(&mut self, a: usize, b: usize) -> bool {
        self.pairs.insert(Self::key(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn key(a: usize, b: usize) -> (usize, usize) {
        (a.min(b), a.max(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_unordered() {
        let mut visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert!(visited.insert(1, 2));
        assert!(visited.contains(2, 1));
        assert!(!visited.insert(2, 1));
        assert_eq!(visited.len(), 1);
        assert!(!visited.contains(1, 3));
    }
}
