//! Per-face attribute containers.
//!
//! A container holds exactly one value per mesh face for a single
//! [`DataKind`]. The registry only sees containers through the narrow
//! [`FaceDataContainer`] capability; [`MemoryContainer`] is the concrete,
//! `Vec`-backed implementation that typed callers work with.
//!
//! # Invariants
//!
//! Inside a mesh, every container's length equals the mesh face count. The
//! only way to grow a container by one face is
//! [`MemoryContainer::add_face_data`], which refuses to grow unless the caller
//! states the face count it expects afterwards.

use std::any::Any;
use std::fmt::Debug;

use crate::data::kind::DataKind;
use crate::data::remap::ResourceIdMap;
use crate::mesh_error::{MeshError, MeshResult};

/// A value that can be attached to every face of a mesh.
///
/// `Default` is the "no data" value given to faces that were created before
/// the kind was registered, or that came from a merge source without it.
pub trait FaceData: Clone + Default + Debug + PartialEq + Send + Sync + 'static {
    /// Called on the copy of a value moving from a merge source into a target.
    ///
    /// Values holding references to source resources (a material group, a
    /// texture) translate them through `remap`. The default keeps the value
    /// verbatim.
    #[inline]
    fn invalidate_on_merge(&mut self, remap: &ResourceIdMap) {
        let _ = remap;
    }
}

/// Type-erased view of a per-face container.
pub trait FaceDataContainer: Debug + Send + Sync {
    /// Kind this container is registered under.
    fn kind(&self) -> DataKind;

    /// Number of face slots.
    fn len(&self) -> u32;

    /// Whether the container holds no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Truncate, or pad with default values, to exactly `new_len` slots.
    fn resize(&mut self, new_len: u32);

    /// Independent copy sized to `target_face_count`.
    fn clone_container(&self, target_face_count: u32) -> Box<dyn FaceDataContainer>;

    /// Drop every slot.
    fn clear(&mut self);

    /// Empty container of the same kind and value type.
    fn empty_like(&self) -> Box<dyn FaceDataContainer>;

    /// Whether `other` stores the same value type.
    fn same_value_type(&self, other: &dyn FaceDataContainer) -> bool {
        self.as_any().type_id() == other.as_any().type_id()
    }

    /// Append every value of `source`, passing each copy through
    /// [`FaceData::invalidate_on_merge`].
    fn extend_merged(
        &mut self,
        source: &dyn FaceDataContainer,
        remap: &ResourceIdMap,
    ) -> MeshResult<()>;

    /// Slot-wise equality with a container of the same value type.
    fn eq_container(&self, other: &dyn FaceDataContainer) -> bool;

    /// Raw access for recovering the concrete container.
    fn as_any(&self) -> &dyn Any;

    /// Mutable raw access for recovering the concrete container.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// `Vec`-backed container of one `T` per face.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryContainer<T> {
    kind: DataKind,
    values: Vec<T>,
}

impl<T: FaceData> MemoryContainer<T> {
    /// Empty container for `kind`.
    pub fn new(kind: DataKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }

    /// Container for `kind` holding `face_count` default values.
    pub fn with_face_count(kind: DataKind, face_count: u32) -> Self {
        Self {
            kind,
            values: vec![T::default(); face_count as usize],
        }
    }

    /// Grow by one slot for a newly added face and return the slot.
    ///
    /// # Errors
    /// `FaceCountMismatch` unless `expected_new_face_count == len() + 1`; the
    /// container is left untouched in that case.
    pub fn add_face_data(&mut self, expected_new_face_count: u32) -> MeshResult<&mut T> {
        let found = self.count().saturating_add(1);
        if expected_new_face_count != found {
            return Err(MeshError::FaceCountMismatch {
                expected: expected_new_face_count,
                found,
            });
        }
        self.values.push(T::default());
        let last = self.values.len() - 1;
        Ok(&mut self.values[last])
    }

    /// Value stored for face `index`.
    pub fn get_face_data(&self, index: u32) -> MeshResult<&T> {
        let len = self.count();
        self.values
            .get(index as usize)
            .ok_or(MeshError::IndexOutOfRange { index, len })
    }

    /// Mutable value stored for face `index`.
    pub fn get_face_data_mut(&mut self, index: u32) -> MeshResult<&mut T> {
        let len = self.count();
        self.values
            .get_mut(index as usize)
            .ok_or(MeshError::IndexOutOfRange { index, len })
    }

    /// Overwrite the value of face `index`.
    pub fn set_face_data(&mut self, index: u32, value: T) -> MeshResult<()> {
        *self.get_face_data_mut(index)? = value;
        Ok(())
    }

    /// Independent copy truncated or padded to `target_face_count`.
    pub fn clone_to(&self, target_face_count: u32) -> Self {
        let mut values: Vec<T> = self
            .values
            .iter()
            .take(target_face_count as usize)
            .cloned()
            .collect();
        values.resize(target_face_count as usize, T::default());
        Self {
            kind: self.kind,
            values,
        }
    }

    /// All values in face order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// All values in face order, mutable in place. The length is fixed.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Iterator over `(face index, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.values.iter().enumerate().map(|(i, v)| (i as u32, v))
    }

    /// Number of stored values.
    #[inline]
    pub fn count(&self) -> u32 {
        self.values.len() as u32
    }
}

impl<T: FaceData> FaceDataContainer for MemoryContainer<T> {
    fn kind(&self) -> DataKind {
        self.kind
    }

    fn len(&self) -> u32 {
        self.count()
    }

    fn resize(&mut self, new_len: u32) {
        self.values.resize(new_len as usize, T::default());
    }

    fn clone_container(&self, target_face_count: u32) -> Box<dyn FaceDataContainer> {
        Box::new(self.clone_to(target_face_count))
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn empty_like(&self) -> Box<dyn FaceDataContainer> {
        Box::new(MemoryContainer::<T>::new(self.kind))
    }

    fn extend_merged(
        &mut self,
        source: &dyn FaceDataContainer,
        remap: &ResourceIdMap,
    ) -> MeshResult<()> {
        let source = source
            .as_any()
            .downcast_ref::<MemoryContainer<T>>()
            .ok_or(MeshError::DataKindMismatch(self.kind))?;
        self.values.reserve(source.values.len());
        for value in &source.values {
            let mut copy = value.clone();
            copy.invalidate_on_merge(remap);
            self.values.push(copy);
        }
        Ok(())
    }

    fn eq_container(&self, other: &dyn FaceDataContainer) -> bool {
        other
            .as_any()
            .downcast_ref::<MemoryContainer<T>>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
