//! Parameter storage for linear, factorization machine (FM) and field-aware factorization
//! machine (FFM) models.
//!
//! A [`Model`] owns a flat, aligned `f32` buffer laid out by a [`ParameterLayout`]. Every
//! logical weight is paired with an ancillary value the optimizer uses, e.g. as an adaptive
//! learning rate accumulator. Models are either initialized from scratch or restored from a
//! binary checkpoint.

pub mod checkpoint;
pub mod error;
pub mod initialization;
pub mod layout;
pub mod model;
pub mod spec;
pub mod storage;
pub mod variant;

pub use error::{ParamsErr, Result};
pub use layout::{ALIGN, ALIGN_BYTES, Dims, ParameterLayout};
pub use model::Model;
pub use spec::ModelSpec;
pub use variant::ScoreVariant;
