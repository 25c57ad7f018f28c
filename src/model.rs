use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::{info, warn};
use rand::Rng;

use crate::{
    checkpoint::{self, Deserialize, Header, Serialize},
    error::{ParamsErr, Result},
    initialization::{DEFAULT_SEED, Initializer},
    layout::{Dims, ParameterLayout},
    spec::ModelSpec,
    storage::AlignedBuffer,
    variant::ScoreVariant,
};

/// The parameters of a linear, FM or FFM model.
///
/// Owns the aligned weight buffer that the optimizer and the scorer read and update through
/// [`Model::params`] and [`Model::params_mut`].
#[derive(Debug)]
pub struct Model {
    layout: ParameterLayout,
    loss: String,
    params: AlignedBuffer,
}

impl Model {
    /// Builds a freshly initialized model, seeded with [`DEFAULT_SEED`].
    pub fn initialize(variant: ScoreVariant, loss: &str, dims: Dims) -> Result<Self> {
        Self::initialize_seeded(variant, loss, dims, DEFAULT_SEED)
    }

    /// Builds a freshly initialized model whose random weights are drawn from `seed`.
    pub fn initialize_seeded(
        variant: ScoreVariant,
        loss: &str,
        dims: Dims,
        seed: u64,
    ) -> Result<Self> {
        Self::initialize_with(variant, loss, dims, &Initializer::seeded(seed))
    }

    /// Builds a freshly initialized model.
    ///
    /// # Arguments
    /// * `variant` - The scoring model.
    /// * `loss` - The loss function name, stored but never interpreted.
    /// * `dims` - The model dimensions.
    /// * `initializer` - Writes the initial weights.
    ///
    /// # Returns
    /// `InvalidArgument` on an empty loss name or invalid dimensions, `OutOfMemory` if the
    /// buffer can't be allocated.
    pub fn initialize_with<R: Rng>(
        variant: ScoreVariant,
        loss: &str,
        dims: Dims,
        initializer: &Initializer<R>,
    ) -> Result<Self> {
        if loss.is_empty() {
            return Err(ParamsErr::InvalidArgument(
                "the loss function name must not be empty".into(),
            ));
        }

        let layout = ParameterLayout::new(variant, dims)?;
        let mut params = AlignedBuffer::zeroed(layout.param_count(), layout.alignment())?;
        initializer.fill(&layout, &mut params)?;

        info!(score = variant.name(), loss = loss, params = params.len(); "initialized model");

        Ok(Self {
            layout,
            loss: loss.to_string(),
            params,
        })
    }

    /// Builds a freshly initialized model from its spec.
    ///
    /// # Returns
    /// `InvalidVariant` before allocating anything if the score function is unknown.
    pub fn from_spec(spec: &ModelSpec) -> Result<Self> {
        let variant = spec.score.parse::<ScoreVariant>()?;
        let seed = spec.seed.unwrap_or(DEFAULT_SEED);
        Self::initialize_seeded(variant, &spec.loss, spec.dims, seed)
    }

    /// Restores a model from a checkpoint file, the weights are taken as they were stored.
    ///
    /// # Returns
    /// `InvalidArgument` on an empty path, `Io` if the file can't be read and `Corrupt` if
    /// its contents are truncated or malformed, dimensions that can't be laid out included.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        check_path(path)?;

        let mut r = BufReader::new(File::open(path)?);
        let model = Self::deserialize(&mut r)?;

        if !r.fill_buf()?.is_empty() {
            warn!(path:? = path; "ignoring trailing bytes after the parameters");
        }

        info!(path:? = path, score = model.variant().name(), params = model.param_count(); "loaded checkpoint");
        Ok(model)
    }

    /// Writes the model to a checkpoint file, replacing it if it exists.
    ///
    /// # Returns
    /// `InvalidArgument` on an empty path, `Io` if the file can't be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        check_path(path)?;

        let mut w = BufWriter::new(File::create(path)?);
        self.serialize(&mut w)?;
        w.flush()?;

        info!(path:? = path, score = self.variant().name(), params = self.param_count(); "saved checkpoint");
        Ok(())
    }

    pub fn variant(&self) -> ScoreVariant {
        self.layout.variant()
    }

    pub fn loss(&self) -> &str {
        &self.loss
    }

    pub fn dims(&self) -> Dims {
        self.layout.dims()
    }

    /// The layout the model dimensions describe.
    ///
    /// A restored model keeps the stored parameter count, which may differ from
    /// [`ParameterLayout::param_count`].
    pub fn layout(&self) -> &ParameterLayout {
        &self.layout
    }

    /// The amount of `f32` slots of the parameter buffer.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// The factor dimension padded to a multiple of [`ALIGN`](crate::layout::ALIGN).
    pub fn aligned_k(&self) -> usize {
        self.layout.aligned_k()
    }

    pub fn params(&self) -> &[f32] {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut [f32] {
        &mut self.params
    }

    fn header(&self) -> Header {
        Header {
            variant: self.variant(),
            loss: self.loss.clone(),
            dims: self.dims(),
        }
    }
}

impl<W: Write> Serialize<W> for Model {
    fn serialize(&self, w: &mut W) -> std::io::Result<()> {
        self.header().serialize(w)?;
        self.params[..].serialize(w)
    }
}

impl<R: Read> Deserialize<R> for Model {
    fn deserialize(r: &mut R) -> Result<Self> {
        let Header {
            variant,
            loss,
            dims,
        } = Header::deserialize(r)?;

        if loss.is_empty() {
            return Err(ParamsErr::Corrupt("empty loss function name".into()));
        }

        let layout = ParameterLayout::new(variant, dims).map_err(|_| {
            ParamsErr::Corrupt(format!("{variant} model dimensions {dims:?} can't be laid out"))
        })?;

        let params = checkpoint::read_params(r, layout.alignment())?;

        if params.len() != layout.param_count() {
            warn!(
                score = variant.name(),
                expected = layout.param_count(),
                stored = params.len();
                "stored parameter count doesn't match the model dimensions {dims:?}"
            );
        }

        Ok(Self {
            layout,
            loss,
            params,
        })
    }
}

fn check_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ParamsErr::InvalidArgument(
            "the checkpoint path must not be empty".into(),
        ));
    }

    Ok(())
}
