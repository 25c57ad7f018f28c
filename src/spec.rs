use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    error::{ParamsErr, Result},
    layout::Dims,
};

/// Model selection and configuration.
///
/// ```json
/// { "score": "ffm", "loss": "cross_entropy", "num_features": 10, "num_fields": 2, "num_factors": 4, "seed": 7 }
/// ```
///
/// `num_fields`, `num_factors` and `seed` may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelSpec {
    /// The score function name, one of `linear`, `fm` or `ffm`.
    pub score: String,
    pub loss: String,
    #[serde(flatten)]
    pub dims: Dims,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ModelSpec {
    /// Parses a `ModelSpec` from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ParamsErr::Config(e.to_string()))
    }

    /// Loads a `ModelSpec` from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ParamsErr::Config(format!("cannot read '{}': {e}", path.display())))?;

        Self::from_json(&content)
    }
}
