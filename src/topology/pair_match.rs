//! Undirected edge table keyed by canonical node pairs.
//!
//! A flat table, not a half-edge structure: each undirected edge `{a, b}`
//! maps to a single `u32` payload, and writing the same edge again replaces
//! the payload (last write wins). Callers that need to count visits keep
//! their own counters indexed by the payload.

use hashbrown::HashMap;

/// Canonical undirected edge `(min(a, b), max(a, b))`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairEntry {
    pub low: u32,
    pub high: u32,
}

impl PairEntry {
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            PairEntry { low: a, high: b }
        } else {
            PairEntry { low: b, high: a }
        }
    }
}

/// Payload table over undirected edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairMatch {
    entries: HashMap<PairEntry, u32>,
}

impl PairMatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for roughly `edges` undirected edges.
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(edges),
        }
    }

    /// Store `payload` for edge `{a, b}`, replacing any previous payload.
    #[inline]
    pub fn add_match(&mut self, a: u32, b: u32, payload: u32) {
        self.entries.insert(PairEntry::new(a, b), payload);
    }

    /// Payload stored for edge `{a, b}`.
    #[inline]
    pub fn check_match(&self, a: u32, b: u32) -> Option<u32> {
        self.entries.get(&PairEntry::new(a, b)).copied()
    }

    /// Forget edge `{a, b}`. Missing edges are ignored.
    #[inline]
    pub fn delete_match(&mut self, a: u32, b: u32) {
        self.entries.remove(&PairEntry::new(a, b));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_entry_is_canonical() {
        assert_eq!(PairEntry::new(1, 1), PairEntry { low: 1, high: 1 });
        assert_eq!(PairEntry::new(2, 1), PairEntry { low: 1, high: 2 });
        assert_eq!(PairEntry::new(1, 2), PairEntry { low: 1, high: 2 });
    }

    #[test]
    fn last_write_wins_in_either_direction() {
        let mut p = PairMatch::new();
        p.add_match(1, 1, 2);
        assert_eq!(p.check_match(1, 1), Some(2));
        p.add_match(1, 1, 4);
        assert_eq!(p.check_match(1, 1), Some(4));
        p.add_match(2, 1, 5);
        assert_eq!(p.check_match(1, 2), Some(5));
        p.add_match(1, 2, 1);
        assert_eq!(p.check_match(2, 1), Some(1));
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut p = PairMatch::new();
        p.add_match(1, 2, 5);
        p.delete_match(2, 3);
        assert_eq!(p.check_match(1, 2), Some(5));
        p.delete_match(2, 1);
        assert_eq!(p.check_match(1, 2), None);
        p.delete_match(1, 2);
        assert!(p.is_empty());
    }
}
