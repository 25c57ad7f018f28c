use std::{cell::RefCell, rc::Rc};

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{ConstParamGen, ParamGen, RandParamGen};
use crate::{
    error::{ParamsErr, Result},
    layout::ParameterLayout,
    variant::ScoreVariant,
};

/// Seed used whenever the caller doesn't provide one, so unseeded models are reproducible.
pub const DEFAULT_SEED: u64 = 1;

/// Writes the initial state of a freshly allocated parameter buffer.
///
/// Linear weights start at `0.0`, FM and FFM latent factors are drawn uniformly from
/// `[0, 1 / sqrt(K))` and every ancillary value starts at `1.0`.
pub struct Initializer<R: Rng> {
    rng: Rc<RefCell<R>>,
}

impl Initializer<StdRng> {
    /// Creates an `Initializer` backed by a `StdRng` seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Initializer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Rc::new(RefCell::new(rng)),
        }
    }

    /// Writes every slot of `params` exactly once.
    ///
    /// # Arguments
    /// * `layout` - The layout `params` was allocated for.
    /// * `params` - The parameter buffer.
    ///
    /// # Returns
    /// `InvalidArgument` if `params` isn't the size of `layout`.
    pub fn fill(&self, layout: &ParameterLayout, params: &mut [f32]) -> Result<()> {
        if params.len() != layout.param_count() {
            return Err(ParamsErr::InvalidArgument(format!(
                "the buffer has {} slots but the {} layout needs {}",
                params.len(),
                layout.variant(),
                layout.param_count()
            )));
        }

        if params.is_empty() {
            return Ok(());
        }

        let dims = layout.dims();
        match layout.variant() {
            ScoreVariant::Linear => {
                let weights = ConstParamGen::new(0., dims.num_features);
                fill_pairs(params, weights);
            }
            ScoreVariant::Fm => {
                let limit = params.len() / 2;
                let weights =
                    RandParamGen::factor_uniform(Rc::clone(&self.rng), limit, dims.num_factors)?;
                fill_pairs(params, weights);
            }
            ScoreVariant::Ffm => {
                let limit = dims.num_features * dims.num_fields * dims.num_factors;
                let weights =
                    RandParamGen::factor_uniform(Rc::clone(&self.rng), limit, dims.num_factors)?;
                fill_blocks(params, layout, weights);
            }
        }

        debug!(score = layout.variant().name(), params = params.len(); "initialized parameters");
        Ok(())
    }
}

fn fill_pairs<G: ParamGen>(params: &mut [f32], mut weights: G) {
    for pair in params.chunks_exact_mut(2) {
        let written = weights.fill(&mut pair[..1]);
        debug_assert_eq!(written, Some(1), "weight generator exhausted early");
        pair[1] = 1.;
    }
}

fn fill_blocks<G: ParamGen>(params: &mut [f32], layout: &ParameterLayout, mut weights: G) {
    let align = layout.align();
    let num_factors = layout.dims().num_factors;

    for latent in params.chunks_exact_mut(2 * layout.aligned_k()) {
        for (i, block) in latent.chunks_exact_mut(2 * align).enumerate() {
            let (primaries, ancillaries) = block.split_at_mut(align);
            let real = num_factors.saturating_sub(i * align).min(align);

            let written = weights.fill(&mut primaries[..real]);
            debug_assert_eq!(written, Some(real), "weight generator exhausted early");
            primaries[real..].fill(0.);
            ancillaries.fill(1.);
        }
    }
}
