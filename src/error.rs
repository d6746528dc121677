use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown input type \"{kind}\" for file \"{}\"", path.display())]
    UnsupportedFormat { kind: String, path: PathBuf },

    #[error("the file \"{}\" does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("error reading from \"{}\": {source}", path.display())]
    StreamRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed input in \"{}\" at line {line}: {reason}", path.display())]
    MalformedInput {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("error writing to \"{}\": {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("interrupted")]
    Interrupted,
}
