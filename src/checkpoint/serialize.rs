use std::io::{self, Write};

use super::LenType;

/// Encodes a value into the checkpoint binary format.
pub trait Serialize<W: Write> {
    fn serialize(&self, w: &mut W) -> io::Result<()>;
}

impl<W: Write> Serialize<W> for LenType {
    fn serialize(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.to_le_bytes())
    }
}

impl<W: Write> Serialize<W> for usize {
    fn serialize(&self, w: &mut W) -> io::Result<()> {
        (*self as LenType).serialize(w)
    }
}

/// Length prefixed UTF-8.
impl<W: Write> Serialize<W> for str {
    fn serialize(&self, w: &mut W) -> io::Result<()> {
        self.len().serialize(w)?;
        w.write_all(self.as_bytes())
    }
}

/// Length prefixed raw IEEE-754 bits, little endian.
impl<W: Write> Serialize<W> for [f32] {
    fn serialize(&self, w: &mut W) -> io::Result<()> {
        self.len().serialize(w)?;

        if cfg!(target_endian = "little") {
            return w.write_all(bytemuck::cast_slice(self));
        }

        self.iter().try_for_each(|x| w.write_all(&x.to_le_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_length_prefixed() {
        let mut buf = Vec::new();
        "ffm".serialize(&mut buf).unwrap();

        assert_eq!(buf, [3, 0, 0, 0, 0, 0, 0, 0, b'f', b'f', b'm']);
    }

    #[test]
    fn floats_keep_their_bits() {
        let params = [1.5f32, -0., f32::from_bits(0x7fc0_0001)];
        let mut buf = Vec::new();
        params[..].serialize(&mut buf).unwrap();

        assert_eq!(&buf[..8], &3u64.to_le_bytes());
        let bits: Vec<_> = buf[8..]
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes(b.try_into().unwrap()))
            .collect();
        let expected: Vec<_> = params.iter().map(|x| x.to_bits()).collect();
        assert_eq!(bits, expected);
    }
}
