//! Binary checkpoint format.
//!
//! All integers are little endian `u64`, strings are length prefixed UTF-8 and the
//! parameters are length prefixed raw `f32` bits:
//!
//! ```text
//! score | loss | num_features | num_fields | num_factors | param_count | params...
//! ```

mod deserialize;
mod header;
mod serialize;

pub use deserialize::{Deserialize, read_params};
pub use header::Header;
pub use serialize::Serialize;

type LenType = u64;

/// Upper bound for the strings of a header, anything longer means a corrupt file.
const MAX_NAME_LEN: usize = 1 << 16;
