use std::io::Read;

use super::{LenType, MAX_NAME_LEN};
use crate::{
    error::{ParamsErr, Result},
    storage::AlignedBuffer,
};

/// Decodes a value from the checkpoint binary format.
pub trait Deserialize<R: Read>: Sized {
    fn deserialize(r: &mut R) -> Result<Self>;
}

impl<R: Read> Deserialize<R> for LenType {
    fn deserialize(r: &mut R) -> Result<Self> {
        let mut bytes = [0; size_of::<LenType>()];
        r.read_exact(&mut bytes)?;
        Ok(LenType::from_le_bytes(bytes))
    }
}

impl<R: Read> Deserialize<R> for usize {
    fn deserialize(r: &mut R) -> Result<Self> {
        let value = LenType::deserialize(r)?;
        usize::try_from(value)
            .map_err(|_| ParamsErr::Corrupt(format!("{value} doesn't fit in a usize")))
    }
}

impl<R: Read> Deserialize<R> for String {
    fn deserialize(r: &mut R) -> Result<Self> {
        let len = usize::deserialize(r)?;
        if len > MAX_NAME_LEN {
            return Err(ParamsErr::Corrupt(format!(
                "string of {len} bytes exceeds the {MAX_NAME_LEN} bytes limit"
            )));
        }

        let mut bytes = vec![0; len];
        r.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|e| ParamsErr::Corrupt(format!("invalid string: {e}")))
    }
}

/// Reads a length prefixed parameter buffer.
///
/// The buffer is sized by the stored count, never by the model dimensions.
///
/// # Arguments
/// * `r` - The checkpoint reader, positioned at the parameter count.
/// * `align` - The byte alignment of the new buffer.
///
/// # Returns
/// The parameters as they were written, bit by bit.
pub fn read_params<R: Read>(r: &mut R, align: usize) -> Result<AlignedBuffer> {
    let len = usize::deserialize(r)?;
    let mut params = AlignedBuffer::zeroed(len, align)?;
    r.read_exact(bytemuck::cast_slice_mut(&mut params[..]))?;

    if cfg!(target_endian = "big") {
        params
            .iter_mut()
            .for_each(|x| *x = f32::from_bits(u32::from_le(x.to_bits())));
    }

    Ok(params)
}
