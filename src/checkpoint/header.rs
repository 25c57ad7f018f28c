use std::io::{self, Read, Write};

use super::{Deserialize, Serialize};
use crate::{
    error::{ParamsErr, Result},
    layout::Dims,
    variant::ScoreVariant,
};

/// The model metadata stored ahead of the parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub variant: ScoreVariant,
    pub loss: String,
    pub dims: Dims,
}

impl<W: Write> Serialize<W> for Header {
    fn serialize(&self, w: &mut W) -> io::Result<()> {
        self.variant.name().serialize(w)?;
        self.loss.serialize(w)?;
        self.dims.num_features.serialize(w)?;
        self.dims.num_fields.serialize(w)?;
        self.dims.num_factors.serialize(w)
    }
}

impl<R: Read> Deserialize<R> for Header {
    fn deserialize(r: &mut R) -> Result<Self> {
        let name = String::deserialize(r)?;
        let variant = name
            .parse::<ScoreVariant>()
            .map_err(|_| ParamsErr::Corrupt(format!("unknown score function {name:?}")))?;

        let loss = String::deserialize(r)?;
        let num_features = usize::deserialize(r)?;
        let num_fields = usize::deserialize(r)?;
        let num_factors = usize::deserialize(r)?;

        Ok(Self {
            variant,
            loss,
            dims: Dims::new(num_features, num_fields, num_factors),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn header() -> Header {
        Header {
            variant: ScoreVariant::Ffm,
            loss: "squared".into(),
            dims: Dims::new(2, 3, 4),
        }
    }

    #[test]
    fn field_order() {
        let mut buf = Vec::new();
        header().serialize(&mut buf).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&3u64.to_le_bytes());
        expected.extend_from_slice(b"ffm");
        expected.extend_from_slice(&7u64.to_le_bytes());
        expected.extend_from_slice(b"squared");
        for n in [2u64, 3, 4] {
            expected.extend_from_slice(&n.to_le_bytes());
        }

        assert_eq!(buf, expected);
    }

    #[test]
    fn read_back() {
        let mut buf = Vec::new();
        header().serialize(&mut buf).unwrap();

        let read = Header::deserialize(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read, header());
    }

    #[test]
    fn unknown_variant_is_corrupt() {
        let mut buf = Vec::new();
        "gbdt".serialize(&mut buf).unwrap();
        "squared".serialize(&mut buf).unwrap();

        let err = Header::deserialize(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, ParamsErr::Corrupt(_)));
    }

    #[test]
    fn truncated_is_corrupt() {
        let mut buf = Vec::new();
        header().serialize(&mut buf).unwrap();
        buf.truncate(buf.len() - 1);

        let err = Header::deserialize(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, ParamsErr::Corrupt(_)));
    }
}
