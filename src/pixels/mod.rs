//! Pixel type promotion, raw decoding and normalization
//!
//! Every function in this module is pure: it reads a plane buffer and a
//! [`PixelTypeDescriptor`](crate::types::PixelTypeDescriptor) and returns a
//! freshly allocated result.

mod decode;
mod error;
mod normalize;
mod promotion;

pub use decode::{decode_raw, PixelArray};
pub use error::{PixelError, Result};
pub use normalize::{finite_min_max, integer_range, normalize};
pub use promotion::{select_representation, Representation};
