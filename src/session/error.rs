use thiserror::Error;

use crate::pixels::PixelError;
use crate::types::Region;

/// Errors raised by a reading session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Pixel(#[from] PixelError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A metadata store was requested but the reader cannot provide one
    #[error("Metadata service unavailable: {0}")]
    MissingMetadataService(String),

    #[error("Plane {plane} out of range ({count} planes available)")]
    PlaneOutOfRange { plane: usize, count: usize },

    #[error("Region {region} exceeds plane size {size_x}x{size_y}")]
    RegionOutOfBounds {
        region: Region,
        size_x: usize,
        size_y: usize,
    },

    #[error("Plane buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Failure reported by the underlying format reader
    #[error(transparent)]
    Format(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
