//! Built-in per-face value types for the material, color and texture
//! extensions.

use nalgebra::Vector2;

use crate::data::container::FaceData;
use crate::data::kind::{DataKind, FaceDataKey};
use crate::data::remap::ResourceIdMap;

/// Key for [`BaseMaterialInfo`].
pub const BASE_MATERIAL: FaceDataKey<BaseMaterialInfo> =
    FaceDataKey::new(DataKind::BASE_MATERIAL);
/// Key for [`NodeColorInfo`].
pub const NODE_COLOR: FaceDataKey<NodeColorInfo> = FaceDataKey::new(DataKind::NODE_COLOR);
/// Key for [`TextureCoordsInfo`].
pub const TEXTURE_COORDS: FaceDataKey<TextureCoordsInfo> =
    FaceDataKey::new(DataKind::TEXTURE_COORDS);

/// Reference into a base-material group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BaseMaterialInfo {
    /// Resource id of the material group.
    pub group_id: u32,
    /// Index of the material within the group.
    pub material_index: u32,
}

impl FaceData for BaseMaterialInfo {
    fn invalidate_on_merge(&mut self, remap: &ResourceIdMap) {
        self.group_id = remap.map(self.group_id);
    }
}

/// 8-bit sRGB color with alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Construct from components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Hex string of the form `#rrggbbaa`.
    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// One color per face corner, in face winding order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NodeColorInfo {
    pub colors: [Rgba; 3],
}

impl FaceData for NodeColorInfo {}

/// Texture reference plus one UV per face corner.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextureCoordsInfo {
    /// Resource id of the 2D texture.
    pub texture_id: u32,
    pub coords: [Vector2<f32>; 3],
}

impl Default for TextureCoordsInfo {
    fn default() -> Self {
        Self {
            texture_id: 0,
            coords: [Vector2::zeros(); 3],
        }
    }
}

impl FaceData for TextureCoordsInfo {
    fn invalidate_on_merge(&mut self, remap: &ResourceIdMap) {
        self.texture_id = remap.map(self.texture_id);
    }
}
