use thiserror::Error;

/// Errors raised while decoding or normalizing a plane buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PixelError {
    /// Buffer length is not a whole number of samples
    #[error("Invalid pixel buffer length: {len} bytes is not a multiple of {bytes_per_pixel} bytes per pixel")]
    Decode { len: usize, bytes_per_pixel: usize },

    #[error("Unsupported pixel width: {bytes_per_pixel} bytes (signed={signed}, floating point={floating_point})")]
    UnsupportedWidth {
        bytes_per_pixel: usize,
        signed: bool,
        floating_point: bool,
    },

    #[error("Invalid true bit depth {bits} for {bytes_per_pixel}-byte pixels")]
    InvalidBitDepth { bits: u32, bytes_per_pixel: usize },
}

pub type Result<T> = std::result::Result<T, PixelError>;
