use std::{io, path::PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),
    #[error("couldn't open {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode image")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported decoded format: {color_type:?} at {bit_depth:?}")]
    UnsupportedFormat {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },
    #[error("failed to encode image")]
    Encode(#[from] png::EncodingError),
    #[error("couldn't allocate {bytes} bytes for pixel data")]
    Allocation { bytes: usize },
    #[error("pixel ({row}, {col}) is out of bounds for a {width}x{height} buffer")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: u32,
        height: u32,
    },
    #[error("image dimensions must be non-zero")]
    EmptyImage,
    #[error("expected {expected} bytes of pixel data, got {actual}")]
    Layout { expected: usize, actual: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Io(_) => 1,
            Error::Usage(_) => 2,
            Error::FileOpen { .. } => 3,
            Error::Decode(_) | Error::UnsupportedFormat { .. } => 4,
            Error::Encode(_) => 5,
            Error::Allocation { .. } => 6,
            Error::OutOfBounds { .. } => 7,
            Error::EmptyImage | Error::Layout { .. } => 8,
        }
    }
}
