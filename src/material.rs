use crate::{FaceColorKey, FaceColors};
use indexmap::IndexMap;
use serde::Serialize;

/// Maps each distinct face color of one geometry to its slot in the
/// geometry's MultiMaterial.
///
/// Slots are assigned in first-seen face order; the backing map preserves
/// insertion order so the emitted material list is deterministic across runs.
#[derive(Debug, Default)]
pub struct MaterialTable {
    slots: IndexMap<FaceColorKey, usize>,
}

impl MaterialTable {
    /// Builds the table by scanning every resolved face key in face order.
    pub fn build(colors: &FaceColors) -> Self {
        let mut slots = IndexMap::new();

        for &key in colors.keys() {
            let next = slots.len();
            slots.entry(key).or_insert(next);
        }

        Self { slots }
    }

    /// The slot assigned to `key` during construction.
    pub fn index_of(&self, key: FaceColorKey) -> Option<usize> {
        self.slots.get(&key).copied()
    }

    /// Number of distinct face colors observed.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The materials in slot order, ready for emission.
    pub fn materials(&self) -> Vec<PhongMaterial> {
        self.slots.keys().map(|&key| PhongMaterial::new(key)).collect()
    }
}

/// One per-face material of a MultiMaterial list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhongMaterial {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    pub color: u32,
}

impl PhongMaterial {
    pub fn new(key: FaceColorKey) -> Self {
        let alpha = key.alpha();

        // A fully opaque material carries neither field.
        let (transparent, opacity) = if alpha < 255 {
            (Some(true), Some(f32::from(alpha) / 255.0))
        } else {
            (None, None)
        };

        Self {
            kind: "MeshPhongMaterial",
            transparent,
            opacity,
            color: key.rgb(),
        }
    }
}

/// One block of the top-level `materials` array.
///
/// Every distinct geometry payload gets exactly one block, published under
/// the identifier its scene nodes reference (`"{geometryId}M"`); the list is
/// empty when the geometry has no faces.
#[derive(Debug, Serialize)]
pub struct MultiMaterialBlock {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub materials: Vec<PhongMaterial>,
}

impl MultiMaterialBlock {
    pub fn new(geometry_id: u64, table: &MaterialTable) -> Self {
        Self {
            uuid: material_uuid(geometry_id),
            kind: "MultiMaterial",
            materials: table.materials(),
        }
    }
}

/// The identifier a geometry's MultiMaterial is published under.
///
/// Scene nodes reference materials solely through this string, so it must
/// stay consistent between the `materials` array and the scene graph.
pub fn material_uuid(geometry_id: u64) -> String {
    format!("{}M", geometry_id)
}
