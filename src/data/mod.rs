//! Per-face auxiliary data: kinds, typed containers and the registry.

pub mod container;
pub mod info;
pub mod kind;
pub mod registry;
pub mod remap;

pub use container::{FaceData, FaceDataContainer, MemoryContainer};
pub use info::{BaseMaterialInfo, NodeColorInfo, Rgba, TextureCoordsInfo};
pub use kind::{DataKind, FaceDataKey};
pub use registry::FaceDataRegistry;
pub use remap::ResourceIdMap;
