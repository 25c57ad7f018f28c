use std::{error::Error, fmt, io};

use crate::initialization::RandErr;

/// The crate's result type.
pub type Result<T> = std::result::Result<T, ParamsErr>;

/// Failures while laying out, allocating, initializing or persisting model parameters.
#[derive(Debug)]
pub enum ParamsErr {
    /// The score function name isn't one of `linear`, `fm` or `ffm`.
    InvalidVariant(String),
    /// A dimension, name or path doesn't satisfy the model preconditions.
    InvalidArgument(String),
    /// The parameter buffer couldn't be allocated.
    OutOfMemory { params: usize, bytes: usize },
    /// The checkpoint file couldn't be opened, read or written.
    Io(io::Error),
    /// The checkpoint is truncated or malformed.
    Corrupt(String),
    /// The model spec couldn't be read or parsed.
    Config(String),
}

impl fmt::Display for ParamsErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsErr::InvalidVariant(name) => write!(f, "unknown score function: {name:?}"),
            ParamsErr::InvalidArgument(detail) => write!(f, "invalid argument: {detail}"),
            ParamsErr::OutOfMemory { params, bytes } => write!(
                f,
                "cannot allocate enough memory for the model parameters: {params} params ({bytes} bytes)"
            ),
            ParamsErr::Io(e) => write!(f, "io error: {e}"),
            ParamsErr::Corrupt(detail) => write!(f, "corrupt checkpoint: {detail}"),
            ParamsErr::Config(detail) => write!(f, "invalid model spec: {detail}"),
        }
    }
}

impl Error for ParamsErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParamsErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParamsErr {
    fn from(value: io::Error) -> Self {
        match value.kind() {
            io::ErrorKind::UnexpectedEof => Self::Corrupt(format!("truncated: {value}")),
            _ => Self::Io(value),
        }
    }
}

impl From<RandErr> for ParamsErr {
    fn from(value: RandErr) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}
