// Error kinds surfaced by compress/decompress: an I/O failure tied to a
// path, a malformed container, or a bad argument. No task run on the work
// pool can fail except block decoding, whose Result is folded into this
// type by the coordinator once every block has been collected.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io { path: PathBuf, source: io::Error },
    ContainerCorrupt(String),
    InvalidArgument(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Error {
        Error::Io { path: path.into(), source }
    }

    pub fn corrupt(msg: impl Into<String>) -> Error {
        Error::ContainerCorrupt(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path.display(), source)
            }
            Error::ContainerCorrupt(msg) => write!(f, "container corrupt: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::ContainerCorrupt(_) | Error::InvalidArgument(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
