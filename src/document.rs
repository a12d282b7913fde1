#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::{
    DecodedPayload, FaceColors, GeometryBlock, MaterialTable, MeshNode, Model, MultiMaterialBlock,
    Result,
};
use serde::Serialize;
use std::io::Write;

/// Document header of the three.js JSON object format.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metadata {
    #[serde(rename = "formatVersion")]
    pub format_version: f32,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub generator: &'static str,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            format_version: 4.3,
            kind: "object",
            generator: "threescene three.js serializer",
        }
    }
}

/// Streams the scene document to an output sink one top-level section at a
/// time, flushing after each, so the document is never buffered whole.
///
/// The four sections are written in the fixed order `metadata`, `materials`,
/// `geometries`, `object`; the first three establish every identifier the
/// scene graph references. A rejected write aborts the remainder of the
/// conversion and partial output is not rewound.
#[derive(Debug)]
pub struct DocumentWriter<W> {
    sink: W,
}

/// The small per-geometry state carried across the `materials` and
/// `geometries` sections.
///
/// Only the face keys and the table are cached, so both sections agree on
/// every face's material index while the decoded buffers themselves live no
/// longer than the section that writes them.
struct ResolvedGeometry {
    geometry_id: u64,
    colors: FaceColors,
    table: MaterialTable,
}

impl ResolvedGeometry {
    fn new(model: &Model, geometry_id: u64) -> Self {
        let payload = match model.payloads.get(&geometry_id) {
            Some(payload) => payload.decode(geometry_id),
            None => {
                // Keep the cross-references valid by emitting empty records
                // under the referenced id.
                warn!(
                    "geometry {} is referenced but has no payload, emitting empty records",
                    geometry_id
                );

                DecodedPayload::default()
            }
        };

        let colors = FaceColors::resolve(geometry_id, &payload);
        let table = MaterialTable::build(&colors);

        Self {
            geometry_id,
            colors,
            table,
        }
    }

    /// Re-decodes the payload for the geometries pass.
    ///
    /// Decoding is deterministic and side-effect free, and the material
    /// indices come from the cached keys, so the second pass cannot drift
    /// from the first.
    fn decode(&self, model: &Model) -> DecodedPayload {
        model
            .payloads
            .get(&self.geometry_id)
            .map(|payload| payload.decode(self.geometry_id))
            .unwrap_or_default()
    }
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Writes the complete document for `model` and flushes the sink.
    pub fn write_document(&mut self, model: &Model) -> Result<()> {
        let resolved: Vec<_> = model
            .distinct_geometries()
            .into_iter()
            .map(|geometry_id| ResolvedGeometry::new(model, geometry_id))
            .collect();

        self.sink.write_all(b"{\"metadata\":")?;
        serde_json::to_writer(&mut self.sink, &Metadata::default())?;

        self.sink.write_all(b",\"materials\":[")?;

        for (i, entry) in resolved.iter().enumerate() {
            if i > 0 {
                self.sink.write_all(b",")?;
            }

            serde_json::to_writer(
                &mut self.sink,
                &MultiMaterialBlock::new(entry.geometry_id, &entry.table),
            )?;
        }

        self.sink.write_all(b"]")?;
        self.sink.flush()?;

        self.sink.write_all(b",\"geometries\":[")?;

        for (i, entry) in resolved.iter().enumerate() {
            if i > 0 {
                self.sink.write_all(b",")?;
            }

            // One decoded payload alive at a time; dropped before the next
            // geometry is written.
            let payload = entry.decode(model);

            serde_json::to_writer(
                &mut self.sink,
                &GeometryBlock::new(entry.geometry_id, &payload, &entry.colors, &entry.table),
            )?;
        }

        self.sink.write_all(b"]")?;
        self.sink.flush()?;

        self.sink.write_all(
            b",\"object\":{\"uuid\":\"root\",\"type\":\"Scene\",\
              \"matrix\":[1,0,0,0,0,1,0,0,0,0,1,0,0,0,0,1],\"children\":[",
        )?;

        for (i, instance) in model.instances.iter().enumerate() {
            if i > 0 {
                self.sink.write_all(b",")?;
            }

            serde_json::to_writer(&mut self.sink, &MeshNode::new(instance))?;
        }

        self.sink.write_all(b"]}}")?;
        self.sink.flush()?;

        Ok(())
    }
}

/// Converts `model` into a three.js JSON scene document on `sink`.
///
/// This is the whole pipeline in one call: buffer decoding, face color
/// resolution, material and geometry deduplication, and scene assembly,
/// streamed in a single pass.
pub fn write_scene<W: Write>(sink: W, model: &Model) -> Result<()> {
    DocumentWriter::new(sink).write_document(model)
}
