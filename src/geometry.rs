#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::{DecodedPayload, FaceColors, MaterialTable};
use itertools::Itertools;
use serde::Serialize;

/// Face-type flag of the three.js JSON format: a triangle whose material is
/// assigned per face.
const TRIANGLE_WITH_FACE_MATERIAL: u32 = 2;

/// One block of the top-level `geometries` array.
///
/// Borrows the decoded vertex and normal sequences so a large mesh is not
/// copied again just to be serialized.
#[derive(Debug, Serialize)]
pub struct GeometryBlock<'a> {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: GeometryData<'a>,
}

#[derive(Debug, Serialize)]
pub struct GeometryData<'a> {
    pub vertices: &'a [f32],
    pub normals: &'a [f32],
    pub faces: Vec<u32>,
}

impl<'a> GeometryBlock<'a> {
    /// Assembles the record for one distinct payload.
    ///
    /// Every face becomes the 5-tuple `(2, i0, i1, i2, materialIndex)`, the
    /// indices verbatim and the material index looked up through the cached
    /// face keys the table was built from. Empty buffers simply produce
    /// empty arrays; the object renders as empty rather than failing.
    pub fn new(
        geometry_id: u64,
        payload: &'a DecodedPayload,
        colors: &FaceColors,
        table: &MaterialTable,
    ) -> Self {
        let mut faces = Vec::with_capacity(colors.face_count() * 5);

        for (face, (i0, i1, i2)) in payload.indices.iter().copied().tuples().enumerate() {
            let key = colors.key(face);

            // Unreachable while the table and keys come from the same
            // resolution pass; fall back to slot 0 rather than aborting.
            let slot = table.index_of(key).unwrap_or_else(|| {
                warn!(
                    "geometry {}: face color {:#010x} missing from material table",
                    geometry_id,
                    key.packed()
                );

                0
            });

            faces.extend_from_slice(&[TRIANGLE_WITH_FACE_MATERIAL, i0, i1, i2, slot as u32]);
        }

        Self {
            uuid: geometry_id.to_string(),
            kind: "Geometry",
            data: GeometryData {
                vertices: &payload.vertices,
                normals: &payload.normals,
                faces,
            },
        }
    }
}
