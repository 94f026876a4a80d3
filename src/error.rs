use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`], useful when callers only care about
/// which stage of the pipeline rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad signature, misplaced IHDR or values outside the supported profile.
    Format,
    /// Chunk framing that runs past the buffer or fails its CRC.
    Structure,
    /// The codec rejected the IDAT payload.
    Decompression,
    /// Row or pixel counts disagree with the declared dimensions.
    Consistency,
    /// Bad arguments or unreadable/unwritable files.
    Input,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input doesn't start with the PNG signature")]
    Signature,

    #[error("expected IHDR as the first chunk, found {0}")]
    MissingHeader(String),

    #[error("malformed chunk stream at byte {offset}: {reason}")]
    Structure { offset: usize, reason: String },

    #[error("CRC mismatch in {chunk_type} chunk: stored {stored:#010x}, computed {computed:#010x}")]
    Crc {
        chunk_type: String,
        stored: u32,
        computed: u32,
    },

    #[error("failed to decompress image data: {0}")]
    Decompression(String),

    #[error("there has been a data mismatch: expected {expected} rows, but got {actual} rows")]
    RowCount { expected: usize, actual: usize },

    #[error("row {row} mismatch: expected {expected} pixels, but got {actual} pixels")]
    PixelCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported filter type {0}")]
    UnsupportedFilter(u8),

    #[error("unsupported image: {0}")]
    Unsupported(String),

    #[error("invalid channel {0:?}, expected one of red, green or blue")]
    InvalidChannel(String),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Signature
            | Self::MissingHeader(_)
            | Self::UnsupportedFilter(_)
            | Self::Unsupported(_) => ErrorKind::Format,
            Self::Structure { .. } | Self::Crc { .. } => ErrorKind::Structure,
            Self::Decompression(_) => ErrorKind::Decompression,
            Self::RowCount { .. } | Self::PixelCount { .. } => ErrorKind::Consistency,
            Self::InvalidChannel(_) | Self::Read { .. } | Self::Write { .. } => ErrorKind::Input,
        }
    }
}
