use crate::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};

/// Decodes a raw buffer as little-endian IEEE-754 float32 values.
///
/// An empty buffer decodes to an empty sequence. A length that is not a
/// multiple of 4 is rejected rather than silently truncated.
pub fn decode_floats(bytes: &[u8]) -> Result<Vec<f32>> {
    check_length(bytes)?;

    let mut values = vec![0.0; bytes.len() / 4];
    LittleEndian::read_f32_into(bytes, &mut values);

    Ok(values)
}

/// Decodes a raw buffer as little-endian uint32 values.
///
/// Used for the triangle index buffer; the little-endian layout is part of
/// the format contract with the upstream model, not a platform detail.
pub fn decode_indices(bytes: &[u8]) -> Result<Vec<u32>> {
    check_length(bytes)?;

    let mut values = vec![0; bytes.len() / 4];
    LittleEndian::read_u32_into(bytes, &mut values);

    Ok(values)
}

fn check_length(bytes: &[u8]) -> Result<()> {
    if bytes.len() % 4 != 0 {
        return Err(Error::MalformedBuffer { len: bytes.len() });
    }

    Ok(())
}
