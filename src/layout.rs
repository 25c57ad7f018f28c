use std::mem::{align_of, size_of};

use serde::Deserialize;

use crate::{
    error::{ParamsErr, Result},
    variant::ScoreVariant,
};

/// Number of `f32` lanes in a 128-bit SIMD register.
pub const ALIGN: usize = 4;

/// Byte alignment of FFM parameter buffers.
pub const ALIGN_BYTES: usize = ALIGN * size_of::<f32>();

/// Rounds `num_factors` up to the next multiple of `align`, `None` if `align` is zero or the
/// result doesn't fit in a `usize`.
pub fn aligned_k(num_factors: usize, align: usize) -> Option<usize> {
    num_factors.checked_next_multiple_of(align)
}

/// The model dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Dims {
    pub num_features: usize,
    #[serde(default)]
    pub num_fields: usize,
    #[serde(default)]
    pub num_factors: usize,
}

impl Dims {
    pub fn new(num_features: usize, num_fields: usize, num_factors: usize) -> Self {
        Self {
            num_features,
            num_fields,
            num_factors,
        }
    }
}

/// The slot indices of a single logical weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub primary: usize,
    pub ancillary: usize,
}

/// What a given slot of the buffer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// A model weight.
    Primary,
    /// An inert FFM slot past the last real factor, always `0.0`.
    Padding,
    /// The optimizer value paired with a weight, starts at `1.0`.
    Ancillary,
}

/// Maps a model variant and its dimensions to the flat parameter buffer.
///
/// Every logical weight takes two slots, the weight itself and an ancillary value used by
/// the optimizer. Linear and FM models store both side by side. FFM models store, for every
/// `(feature, field)`, `aligned_k / align` blocks of `2 * align` slots: `align` weights
/// followed by their `align` ancillary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterLayout {
    variant: ScoreVariant,
    dims: Dims,
    align: usize,
    aligned_k: usize,
    param_count: usize,
}

impl ParameterLayout {
    /// Creates the layout for the target SIMD width, see [`ALIGN`].
    pub fn new(variant: ScoreVariant, dims: Dims) -> Result<Self> {
        Self::with_align(variant, dims, ALIGN)
    }

    /// Creates a new `ParameterLayout`.
    ///
    /// # Arguments
    /// * `variant` - The scoring model.
    /// * `dims` - The model dimensions.
    /// * `align` - The amount of `f32` lanes FFM factor blocks are padded to.
    ///
    /// # Returns
    /// `InvalidArgument` if there are no features, `align` isn't a power of two or the
    /// parameter count overflows.
    pub fn with_align(variant: ScoreVariant, dims: Dims, align: usize) -> Result<Self> {
        if dims.num_features == 0 {
            return Err(ParamsErr::InvalidArgument(
                "the number of features must be positive".into(),
            ));
        }

        if !align.is_power_of_two() {
            return Err(ParamsErr::InvalidArgument(format!(
                "the alignment must be a power of two, got {align}"
            )));
        }

        let overflow = || {
            ParamsErr::InvalidArgument(format!(
                "the {variant} parameter count overflows for {dims:?}"
            ))
        };

        let aligned_k = aligned_k(dims.num_factors, align).ok_or_else(overflow)?;
        let per_feature = match variant {
            ScoreVariant::Linear => Some(1),
            ScoreVariant::Fm => Some(dims.num_factors),
            ScoreVariant::Ffm => aligned_k.checked_mul(dims.num_fields),
        };

        let param_count = per_feature
            .and_then(|n| n.checked_mul(dims.num_features))
            .and_then(|n| n.checked_mul(2))
            .ok_or_else(overflow)?;

        Ok(Self {
            variant,
            dims,
            align,
            aligned_k,
            param_count,
        })
    }

    pub fn variant(&self) -> ScoreVariant {
        self.variant
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The amount of `f32` lanes of a factor block.
    pub fn align(&self) -> usize {
        self.align
    }

    /// The factor dimension rounded up to a multiple of `align`.
    pub fn aligned_k(&self) -> usize {
        self.aligned_k
    }

    /// The total amount of `f32` slots of the buffer.
    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Byte alignment the buffer must be allocated with.
    ///
    /// FFM buffers are aligned to a whole factor block so it can be loaded and stored at once.
    pub fn alignment(&self) -> usize {
        match self.variant {
            ScoreVariant::Linear | ScoreVariant::Fm => align_of::<f32>(),
            ScoreVariant::Ffm => self.align * size_of::<f32>(),
        }
    }

    /// Locates a logical weight inside the buffer.
    ///
    /// `field` and `factor` are ignored for linear models, `field` is ignored for FM models.
    ///
    /// # Returns
    /// `None` if any of the used indices is out of range, FFM padding included.
    pub fn slot(&self, feature: usize, field: usize, factor: usize) -> Option<Slot> {
        let Dims {
            num_features,
            num_fields,
            num_factors,
        } = self.dims;

        if feature >= num_features {
            return None;
        }

        let primary = match self.variant {
            ScoreVariant::Linear => feature * 2,
            ScoreVariant::Fm if factor < num_factors => (feature * num_factors + factor) * 2,
            ScoreVariant::Ffm if field < num_fields && factor < num_factors => {
                let latent = (feature * num_fields + field) * 2 * self.aligned_k;
                let block = factor / self.align * 2 * self.align;
                latent + block + factor % self.align
            }
            _ => return None,
        };

        let ancillary = match self.variant {
            ScoreVariant::Ffm => primary + self.align,
            _ => primary + 1,
        };

        Some(Slot { primary, ancillary })
    }

    /// Tells what the slot at `index` holds, `None` if it's out of bounds.
    pub fn classify(&self, index: usize) -> Option<SlotKind> {
        if index >= self.param_count {
            return None;
        }

        let kind = match self.variant {
            ScoreVariant::Linear | ScoreVariant::Fm if index % 2 == 0 => SlotKind::Primary,
            ScoreVariant::Linear | ScoreVariant::Fm => SlotKind::Ancillary,
            ScoreVariant::Ffm => {
                let offset = index % (2 * self.aligned_k);
                let lane = offset % (2 * self.align);

                if lane >= self.align {
                    SlotKind::Ancillary
                } else if offset / (2 * self.align) * self.align + lane < self.dims.num_factors {
                    SlotKind::Primary
                } else {
                    SlotKind::Padding
                }
            }
        };

        Some(kind)
    }
}
