#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::{decode_floats, decode_indices, material_uuid, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// The shared binary mesh data for one distinct 3D shape.
///
/// All buffers hold raw little-endian bytes exactly as supplied by the
/// upstream model; an empty buffer stands for an absent one.
#[derive(Clone, Debug, Default)]
pub struct GeometryPayload {
    /// Vertex positions, float32 triples.
    pub vertices: Vec<u8>,
    /// Vertex normals, float32 triples.
    pub normals: Vec<u8>,
    /// Triangle indices, uint32, three per face.
    pub indices: Vec<u8>,
    /// Per-vertex colors, float32 R,G,B,A quadruples in [0, 1].
    pub colors: Vec<u8>,
}

impl GeometryPayload {
    /// Decodes all four buffers into typed sequences.
    ///
    /// A buffer whose length is not a multiple of 4 is dropped and replaced
    /// by an empty sequence, so a partially corrupt payload degrades to an
    /// empty mesh instead of aborting the conversion.
    pub fn decode(&self, geometry_id: u64) -> DecodedPayload {
        DecodedPayload {
            vertices: or_empty(geometry_id, "vertex", decode_floats(&self.vertices)),
            normals: or_empty(geometry_id, "normal", decode_floats(&self.normals)),
            indices: or_empty(geometry_id, "index", decode_indices(&self.indices)),
            colors: or_empty(geometry_id, "color", decode_floats(&self.colors)),
        }
    }
}

fn or_empty<T>(geometry_id: u64, buffer: &str, decoded: Result<Vec<T>>) -> Vec<T> {
    match decoded {
        Ok(values) => values,
        Err(err) => {
            warn!("geometry {}: {} buffer dropped: {}", geometry_id, buffer, err);

            Vec::new()
        }
    }
}

/// A payload's buffers decoded to typed sequences.
#[derive(Debug, Default)]
pub struct DecodedPayload {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
    pub colors: Vec<f32>,
}

/// One placed occurrence of a payload in the scene.
#[derive(Clone, Debug)]
pub struct ObjectInstance {
    /// Stable identifier from the source model, e.g. an IFC global id.
    pub instance_id: String,
    /// The payload this instance renders; many instances may share one.
    pub geometry_id: u64,
    /// Row-major 4x4 affine transform, passed through verbatim.
    pub matrix: [f32; 16],
    /// Human-readable element type label, e.g. "IfcWall".
    pub type_label: String,
}

/// The full input of one conversion run.
///
/// Instances arrive pre-filtered by the host (the element-class allow-list
/// is applied upstream) and are emitted as scene nodes in this order.
#[derive(Debug, Default)]
pub struct Model {
    pub instances: Vec<ObjectInstance>,
    /// Payloads keyed by geometry id.
    pub payloads: BTreeMap<u64, GeometryPayload>,
}

impl Model {
    /// Geometry ids in deduplication order: the order of first reference by
    /// an instance. The `materials` and `geometries` arrays are both emitted
    /// in this order, each id exactly once.
    pub fn distinct_geometries(&self) -> Vec<u64> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();

        for instance in &self.instances {
            if seen.insert(instance.geometry_id) {
                order.push(instance.geometry_id);
            }
        }

        order
    }
}

/// One child node of the scene root, referencing its shared geometry and
/// material records by identifier.
#[derive(Debug, Serialize)]
pub struct MeshNode {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub material: String,
    pub geometry: String,
    pub matrix: [f32; 16],
}

impl MeshNode {
    pub fn new(instance: &ObjectInstance) -> Self {
        Self {
            uuid: instance.instance_id.clone(),
            name: instance.type_label.clone(),
            kind: "Mesh",
            material: material_uuid(instance.geometry_id),
            geometry: instance.geometry_id.to_string(),
            matrix: instance.matrix,
        }
    }
}
