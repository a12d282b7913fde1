use std::io;
use thiserror::Error;

/// Failure conditions of a conversion run.
///
/// Only `Write` is fatal for the run as a whole; the two malformed-input
/// conditions are recoverable and the affected geometry degrades instead
/// (see the `buffer` and `color` modules).
#[derive(Debug, Error)]
pub enum Error {
    /// A binary buffer's length is not a multiple of the 4-byte element size.
    #[error("buffer length {len} is not a multiple of 4")]
    MalformedBuffer { len: usize },
    /// A face references a vertex index outside the valid vertex range.
    #[error("face index {index} out of range for {vertex_count} vertices")]
    MalformedGeometry { index: u32, vertex_count: usize },
    /// The output sink rejected a write; partial output is not rewound.
    #[error("write to output sink failed")]
    Write(#[from] io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        // Serializing our own blocks only fails on sink I/O.
        Self::Write(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
