#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::{DecodedPayload, Error, Result};
use itertools::Itertools;

/// Packed `0xRRGGBBAA` average color of a triangle face.
///
/// Two faces with the same packed color share one slot in their geometry's
/// material table, so this value is the deduplication key for materials.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FaceColorKey(u32);

impl FaceColorKey {
    /// Opaque white, the documented default when color data is absent.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// The RGB portion as a 24-bit integer, red in the high byte.
    pub fn rgb(self) -> u32 {
        self.0 >> 8
    }

    /// The 8-bit alpha channel.
    pub fn alpha(self) -> u8 {
        self.0 as u8
    }

    /// The full packed value.
    pub fn packed(self) -> u32 {
        self.0
    }
}

/// The resolved color key of every face of one geometry, in face order.
///
/// Both the material table pass and the geometry emission pass read these
/// cached keys, so the two passes can never disagree on a face's material.
#[derive(Debug, Default)]
pub struct FaceColors {
    keys: Vec<FaceColorKey>,
}

impl FaceColors {
    /// Resolves one key per face of `payload`.
    ///
    /// An absent color or index buffer resolves every face to opaque white;
    /// this is the documented default, not an error. A face index outside
    /// the vertex range also degrades the whole geometry to white, with the
    /// condition logged once per geometry rather than once per face.
    pub fn resolve(geometry_id: u64, payload: &DecodedPayload) -> Self {
        let face_count = payload.indices.len() / 3;

        if payload.colors.is_empty() || payload.indices.is_empty() {
            return Self::all_white(face_count);
        }

        match resolve_keys(payload) {
            Ok(keys) => Self { keys },
            Err(err) => {
                warn!(
                    "geometry {}: {}; defaulting face colors to white",
                    geometry_id, err
                );

                Self::all_white(face_count)
            }
        }
    }

    /// The key of face `face`, white for a face past the resolved range.
    pub fn key(&self, face: usize) -> FaceColorKey {
        self.keys.get(face).copied().unwrap_or(FaceColorKey::WHITE)
    }

    /// All keys in face order.
    pub fn keys(&self) -> &[FaceColorKey] {
        &self.keys
    }

    pub fn face_count(&self) -> usize {
        self.keys.len()
    }

    fn all_white(face_count: usize) -> Self {
        Self {
            keys: vec![FaceColorKey::WHITE; face_count],
        }
    }
}

fn resolve_keys(payload: &DecodedPayload) -> Result<Vec<FaceColorKey>> {
    // A color buffer shorter than four floats per vertex makes the trailing
    // vertices unusable, which counts as out of range like a bad index.
    let vertex_count = (payload.vertices.len() / 3).min(payload.colors.len() / 4);

    let mut keys = Vec::with_capacity(payload.indices.len() / 3);

    for (i0, i1, i2) in payload.indices.iter().copied().tuples() {
        keys.push(face_key(&payload.colors, [i0, i1, i2], vertex_count)?);
    }

    Ok(keys)
}

/// Averages each channel over the face's three vertices and packs the result
/// most-significant-channel-first, R,G,B,A in buffer layout order.
fn face_key(colors: &[f32], face: [u32; 3], vertex_count: usize) -> Result<FaceColorKey> {
    for &index in &face {
        if index as usize >= vertex_count {
            return Err(Error::MalformedGeometry {
                index,
                vertex_count,
            });
        }
    }

    let mut packed = 0;

    for channel in 0..4 {
        let sum: f32 = face
            .iter()
            .map(|&index| colors[index as usize * 4 + channel])
            .sum();

        let byte = ((sum / 3.0) * 255.0).round().clamp(0.0, 255.0) as u32;
        packed |= byte << ((3 - channel) * 8);
    }

    Ok(FaceColorKey(packed))
}
