use std::{
    fs::File,
    io::{self, BufRead, BufReader, ErrorKind, Write},
    path::{Path, PathBuf},
};

use bzip2::{read::MultiBzDecoder, write::BzEncoder};
use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::error::{Error, Result};

/// Compression scheme of an input file, guessed from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Gzip,
    Bzip2,
    #[cfg(feature = "xz")]
    Xz,
}

impl Encoding {
    pub fn guess(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

        match ext.as_deref() {
            None | Some("cnf" | "dimacs" | "txt") => Ok(Encoding::Plain),
            Some("gz" | "gzip") => Ok(Encoding::Gzip),
            Some("bz2" | "bzip2") => Ok(Encoding::Bzip2),
            #[cfg(feature = "xz")]
            Some("xz") => Ok(Encoding::Xz),
            Some(other) => Err(Error::UnsupportedFormat {
                kind: other.to_string(),
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Opens `path` for line-wise reading, decompressing on the fly.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let encoding = Encoding::guess(path)?;
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::MissingFile(path.to_path_buf()),
        _ => Error::StreamRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!(?encoding, path = %path.display(), "opening input");

    let reader: Box<dyn BufRead> = match encoding {
        Encoding::Plain => Box::new(BufReader::new(file)),
        Encoding::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        Encoding::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(file))),
        #[cfg(feature = "xz")]
        Encoding::Xz => Box::new(BufReader::new(xz2::read::XzDecoder::new(file))),
    };
    Ok(reader)
}

/// Bzip2-compresses `text` in memory; `level` is clamped to `1..=9`.
pub fn compress(text: &[u8], level: u32) -> io::Result<Vec<u8>> {
    let level = bzip2::Compression::new(level.clamp(1, 9));
    let mut encoder = BzEncoder::new(Vec::with_capacity(text.len() / 4), level);
    encoder.write_all(text)?;
    encoder.finish()
}

pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".gr.bz2");
    PathBuf::from(name)
}
