//! Resource-id translation applied to face data while merging meshes.

use hashbrown::HashMap;

/// Maps resource ids of a merge source into the target's id space.
///
/// Ids without an entry map to themselves, so the default map is the
/// identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceIdMap {
    ids: HashMap<u32, u32>,
}

impl ResourceIdMap {
    /// Map every id to itself.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Record that source id `from` is called `to` in the target.
    pub fn insert(&mut self, from: u32, to: u32) -> &mut Self {
        self.ids.insert(from, to);
        self
    }

    /// Translate a source id.
    #[inline]
    pub fn map(&self, id: u32) -> u32 {
        self.ids.get(&id).copied().unwrap_or(id)
    }

    /// Whether no explicit translation has been recorded.
    pub fn is_identity(&self) -> bool {
        self.ids.iter().all(|(from, to)| from == to)
    }
}

impl FromIterator<(u32, u32)> for ResourceIdMap {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_ids_pass_through() {
        let mut map = ResourceIdMap::identity();
        assert!(map.is_identity());
        map.insert(4, 9);
        assert_eq!(map.map(4), 9);
        assert_eq!(map.map(5), 5);
        assert!(!map.is_identity());
    }

    #[test]
    fn collect_from_pairs() {
        let map: ResourceIdMap = [(1, 1), (2, 2)].into_iter().collect();
        assert!(map.is_identity());
    }
}
