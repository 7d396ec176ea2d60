//! FaceDataRegistry: one per-face container for every registered data kind.
//!
//! The registry never owns a face count of its own. Every operation that
//! creates or grows containers takes the mesh's face count as an argument,
//! and the owning [`Mesh`](crate::mesh::Mesh) is responsible for passing the
//! right one. Growth is validate-then-commit across all containers, so a
//! registry is never observed with containers of differing lengths.

use std::collections::BTreeMap;

use crate::data::container::{FaceData, FaceDataContainer, MemoryContainer};
use crate::data::kind::{DataKind, FaceDataKey};
use crate::data::remap::ResourceIdMap;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::{MeshError, MeshResult};

/// Maps each [`DataKind`] to its type-erased container.
#[derive(Debug, Default)]
pub struct FaceDataRegistry {
    containers: BTreeMap<DataKind, Box<dyn FaceDataContainer>>,
}

impl FaceDataRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container for `key`, pre-filled with `face_count` defaults.
    ///
    /// # Errors
    /// `DuplicateDataKind` if the kind is already present.
    pub fn register<T: FaceData>(
        &mut self,
        key: FaceDataKey<T>,
        face_count: u32,
    ) -> MeshResult<&mut MemoryContainer<T>> {
        let kind = key.kind();
        if self.containers.contains_key(&kind) {
            return Err(MeshError::DuplicateDataKind(kind));
        }
        self.containers.insert(
            kind,
            Box::new(MemoryContainer::<T>::with_face_count(kind, face_count)),
        );
        log::trace!("registered face data {kind} with {face_count} slots");
        self.get_mut(key)
    }

    /// Whether a container exists for `kind`.
    #[inline]
    pub fn contains(&self, kind: DataKind) -> bool {
        self.containers.contains_key(&kind)
    }

    /// Registered kinds in ascending order.
    pub fn kinds(&self) -> impl Iterator<Item = DataKind> + '_ {
        self.containers.keys().copied()
    }

    /// Number of registered kinds.
    #[inline]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether no kind is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Untyped container for `kind`.
    pub fn container(&self, kind: DataKind) -> Option<&dyn FaceDataContainer> {
        self.containers.get(&kind).map(|c| c.as_ref())
    }

    /// Typed container for `key`.
    pub fn get<T: FaceData>(&self, key: FaceDataKey<T>) -> MeshResult<&MemoryContainer<T>> {
        let kind = key.kind();
        self.containers
            .get(&kind)
            .ok_or(MeshError::UnknownDataKind(kind))?
            .as_any()
            .downcast_ref::<MemoryContainer<T>>()
            .ok_or(MeshError::DataKindMismatch(kind))
    }

    /// Mutable typed container for `key`.
    pub fn get_mut<T: FaceData>(
        &mut self,
        key: FaceDataKey<T>,
    ) -> MeshResult<&mut MemoryContainer<T>> {
        let kind = key.kind();
        self.containers
            .get_mut(&kind)
            .ok_or(MeshError::UnknownDataKind(kind))?
            .as_any_mut()
            .downcast_mut::<MemoryContainer<T>>()
            .ok_or(MeshError::DataKindMismatch(kind))
    }

    /// Remove and return the container for `kind`.
    pub fn remove(&mut self, kind: DataKind) -> Option<Box<dyn FaceDataContainer>> {
        self.containers.remove(&kind)
    }

    /// Drop every container.
    pub fn clear(&mut self) {
        self.containers.clear();
    }

    /// Give every container one default slot for a newly added face.
    ///
    /// # Errors
    /// `FaceCountMismatch` if any container is not exactly one short of
    /// `new_face_count`; no container grows in that case.
    pub fn add_face(&mut self, new_face_count: u32) -> MeshResult<()> {
        for container in self.containers.values() {
            let found = container.len().saturating_add(1);
            if found != new_face_count {
                return Err(MeshError::FaceCountMismatch {
                    expected: new_face_count,
                    found,
                });
            }
        }
        for container in self.containers.values_mut() {
            container.resize(new_face_count);
        }
        Ok(())
    }

    /// Independent copy whose containers all hold `target_face_count` slots.
    pub fn clone_with(&self, target_face_count: u32) -> Self {
        let containers = self
            .containers
            .iter()
            .map(|(&kind, c)| (kind, c.clone_container(target_face_count)))
            .collect();
        Self { containers }
    }

    /// Check that `source` can be appended to this registry.
    ///
    /// Every source container must hold `source_face_count` slots and, where
    /// the kind also exists here, the same value type.
    pub(crate) fn check_merge(
        &self,
        source: &FaceDataRegistry,
        source_face_count: u32,
    ) -> MeshResult<()> {
        for (kind, theirs) in &source.containers {
            if theirs.len() != source_face_count {
                return Err(MeshError::FaceCountMismatch {
                    expected: source_face_count,
                    found: theirs.len(),
                });
            }
            if let Some(ours) = self.containers.get(kind) {
                if !ours.same_value_type(theirs.as_ref()) {
                    return Err(MeshError::DataKindMismatch(*kind));
                }
            }
        }
        Ok(())
    }

    /// Append `source`'s values after `face_count` existing faces.
    ///
    /// Kinds new to this registry are created with `face_count` default
    /// slots first; kinds missing from `source` are padded with defaults.
    /// Callers run [`check_merge`](Self::check_merge) beforehand, which makes
    /// this infallible in practice.
    pub(crate) fn commit_merge(
        &mut self,
        source: &FaceDataRegistry,
        face_count: u32,
        source_face_count: u32,
        remap: &ResourceIdMap,
    ) -> MeshResult<()> {
        for (kind, theirs) in &source.containers {
            if !self.containers.contains_key(kind) {
                let mut fresh = theirs.empty_like();
                fresh.resize(face_count);
                self.containers.insert(*kind, fresh);
            }
        }
        let merged_count = face_count + source_face_count;
        for (kind, ours) in self.containers.iter_mut() {
            match source.containers.get(kind) {
                Some(theirs) => ours.extend_merged(theirs.as_ref(), remap)?,
                None => ours.resize(merged_count),
            }
        }
        Ok(())
    }

    /// Validate that every container holds exactly `face_count` slots.
    pub fn validate_face_count(&self, face_count: u32) -> MeshResult<()> {
        for container in self.containers.values() {
            if container.len() != face_count {
                return Err(MeshError::FaceCountMismatch {
                    expected: face_count,
                    found: container.len(),
                });
            }
        }
        Ok(())
    }
}

impl Clone for FaceDataRegistry {
    fn clone(&self) -> Self {
        let containers = self
            .containers
            .iter()
            .map(|(&kind, c)| (kind, c.clone_container(c.len())))
            .collect();
        Self { containers }
    }
}

impl PartialEq for FaceDataRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.containers.len() == other.containers.len()
            && self.containers.iter().all(|(kind, ours)| {
                other
                    .containers
                    .get(kind)
                    .is_some_and(|theirs| ours.eq_container(theirs.as_ref()))
            })
    }
}

impl DebugInvariants for FaceDataRegistry {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let mut lengths = self.containers.values().map(|c| c.len());
        if let Some(first) = lengths.next() {
            self.validate_face_count(first)?;
        }
        for (kind, container) in &self.containers {
            if container.kind() != *kind {
                return Err(MeshError::DataKindMismatch(*kind));
            }
        }
        Ok(())
    }
}
