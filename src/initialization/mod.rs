mod constant;
mod error;
mod initializer;
mod param_gen;
mod random;

pub use constant::ConstParamGen;
pub use error::RandErr;
pub use initializer::{DEFAULT_SEED, Initializer};
pub use param_gen::ParamGen;
pub use random::RandParamGen;
