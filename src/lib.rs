//! Converts building-element mesh payloads into the three.js JSON object
//! scene format.
//!
//! The input is an ordered sequence of object instances, each referencing a
//! shared geometry payload of raw little-endian buffers (vertex positions,
//! normals, triangle indices, per-vertex colors). The output is a single
//! JSON document with three cross-referencing sections: one MultiMaterial
//! and one Geometry block per distinct payload, and one Mesh node per
//! instance under a Scene root.
//!
//! The whole conversion is a single pass driven by [`write_scene`]; the
//! individual building blocks are public for hosts that stream sections
//! themselves.

#![deny(unsafe_code)]

#[allow(unused_imports)]
use log::{debug, info, warn};

macro_rules! export {
    [$( $module:ident ),* $(,)*] => {
        $(
            mod $module;
            pub use self::$module::*;
        )*
    };
}

export![buffer, color, document, error, geometry, material, scene];
