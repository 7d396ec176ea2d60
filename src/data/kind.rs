//! `DataKind`: stable identifiers for per-face attribute families.
//!
//! Each format extension owns one or more kinds (material reference, vertex
//! color, texture coordinates, lattice properties, ...). The core never
//! interprets a kind; it only uses it as a registry key. Kinds below
//! [`DataKind::FIRST_CUSTOM`] are reserved for the built-in value types in
//! [`crate::data::info`].

use std::fmt;
use std::marker::PhantomData;

use crate::data::container::FaceData;

/// Small, copyable key naming one attribute family.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct DataKind(u16);

impl DataKind {
    /// Material group reference per face.
    pub const BASE_MATERIAL: DataKind = DataKind(1);
    /// One color per face corner.
    pub const NODE_COLOR: DataKind = DataKind(2);
    /// Texture reference plus one UV per face corner.
    pub const TEXTURE_COORDS: DataKind = DataKind(3);
    /// First value free for extension-defined kinds.
    pub const FIRST_CUSTOM: u16 = 0x100;

    /// Wrap a raw kind value.
    #[inline]
    pub const fn new(raw: u16) -> Self {
        DataKind(raw)
    }

    /// Returns the raw kind value.
    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Whether this kind is one of the built-ins.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_CUSTOM
    }
}

impl fmt::Debug for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DataKind").field(&self.0).finish()
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DataKind::BASE_MATERIAL => f.write_str("base-material"),
            DataKind::NODE_COLOR => f.write_str("node-color"),
            DataKind::TEXTURE_COORDS => f.write_str("texture-coords"),
            DataKind(raw) => write!(f, "kind#{raw}"),
        }
    }
}

/// A [`DataKind`] bound to the value type stored under it.
///
/// The registry is type-erased; a key is how callers get their concrete type
/// back without naming it at every call site.
pub struct FaceDataKey<T> {
    kind: DataKind,
    _value: PhantomData<fn() -> T>,
}

impl<T: FaceData> FaceDataKey<T> {
    /// Bind `kind` to value type `T`.
    pub const fn new(kind: DataKind) -> Self {
        Self {
            kind,
            _value: PhantomData,
        }
    }

    /// The untyped kind.
    #[inline]
    pub const fn kind(&self) -> DataKind {
        self.kind
    }
}

impl<T> Clone for FaceDataKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FaceDataKey<T> {}

impl<T> fmt::Debug for FaceDataKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceDataKey")
            .field("kind", &self.kind)
            .field("value", &std::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(DataKind, u16);

    #[test]
    fn builtin_and_custom_kinds() {
        assert!(DataKind::BASE_MATERIAL.is_builtin());
        assert!(!DataKind::new(DataKind::FIRST_CUSTOM).is_builtin());
        assert_eq!(DataKind::new(7).get(), 7);
    }

    #[test]
    fn display_names() {
        assert_eq!(DataKind::NODE_COLOR.to_string(), "node-color");
        assert_eq!(DataKind::new(300).to_string(), "kind#300");
        assert_eq!(format!("{:?}", DataKind::new(3)), "DataKind(3)");
    }
}
