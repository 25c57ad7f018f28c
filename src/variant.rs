use std::{fmt, str::FromStr};

use crate::error::ParamsErr;

/// The scoring model a parameter buffer belongs to.
///
/// Selects both the buffer layout and the way it gets initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreVariant {
    /// One weight per feature.
    Linear,
    /// One latent vector of `K` factors per feature.
    Fm,
    /// One latent vector of `K` factors per feature and field.
    Ffm,
}

impl ScoreVariant {
    /// The canonical name, as written in checkpoints.
    pub const fn name(self) -> &'static str {
        match self {
            ScoreVariant::Linear => "linear",
            ScoreVariant::Fm => "fm",
            ScoreVariant::Ffm => "ffm",
        }
    }
}

impl FromStr for ScoreVariant {
    type Err = ParamsErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(ScoreVariant::Linear),
            "fm" => Ok(ScoreVariant::Fm),
            "ffm" => Ok(ScoreVariant::Ffm),
            other => Err(ParamsErr::InvalidVariant(other.to_string())),
        }
    }
}

impl fmt::Display for ScoreVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        for variant in [ScoreVariant::Linear, ScoreVariant::Fm, ScoreVariant::Ffm] {
            assert_eq!(variant.name().parse::<ScoreVariant>().unwrap(), variant);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        for name in ["", "gbdt", "FFM", " fm"] {
            let err = name.parse::<ScoreVariant>().unwrap_err();
            assert!(matches!(err, ParamsErr::InvalidVariant(ref n) if n == name));
        }
    }
}
