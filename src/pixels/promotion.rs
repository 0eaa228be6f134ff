//! Output representation selection

use std::fmt;

use super::error::{PixelError, Result};
use crate::types::PixelTypeDescriptor;

/// Numeric representation a plane is decoded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Signed 8-bit samples, passed through unchanged
    Int8Bytes,
    /// Unsigned 8-bit and signed 16-bit samples as `i16`
    WidenedShort,
    Float32,
    /// Unsigned 16-bit and signed 32-bit samples as `f64`
    ///
    /// Signed 32-bit values never come back as `i32`: the host runtime reads
    /// `i32::MIN` as its missing value marker.
    WidenedInt32AsDouble,
    Float64,
    /// Unsigned 32-bit (and signed 64-bit) samples as `i64`
    WidenedInt64,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int8Bytes => "int8",
            Self::WidenedShort => "int16",
            Self::Float32 => "float32",
            Self::WidenedInt32AsDouble => "float64 (from integer)",
            Self::Float64 => "float64",
            Self::WidenedInt64 => "int64",
        };
        f.write_str(name)
    }
}

/// Select the output representation for a descriptor
///
/// Unsigned types need the next wider signed type, so the lookup key is the
/// storage width doubled for unsigned integers.
///
/// # Errors
///
/// Returns [`PixelError::UnsupportedWidth`] for widths outside {1, 2, 4, 8},
/// floats narrower than 4 bytes and unsigned 64-bit integers
pub fn select_representation(descriptor: &PixelTypeDescriptor) -> Result<Representation> {
    let bytes_per_pixel = descriptor.bytes_per_pixel;
    let unsupported = || PixelError::UnsupportedWidth {
        bytes_per_pixel,
        signed: descriptor.signed,
        floating_point: descriptor.floating_point,
    };

    if !matches!(bytes_per_pixel, 1 | 2 | 4 | 8) {
        return Err(unsupported());
    }

    if descriptor.floating_point {
        return match bytes_per_pixel {
            4 => Ok(Representation::Float32),
            8 => Ok(Representation::Float64),
            _ => Err(unsupported()),
        };
    }

    let effective_width = if descriptor.signed {
        bytes_per_pixel
    } else {
        bytes_per_pixel * 2
    };

    match effective_width {
        1 => Ok(Representation::Int8Bytes),
        2 => Ok(Representation::WidenedShort),
        4 => Ok(Representation::WidenedInt32AsDouble),
        8 => Ok(Representation::WidenedInt64),
        _ => Err(unsupported()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelType;
    use assert_matches::assert_matches;

    fn select(pixel_type: PixelType) -> Representation {
        select_representation(&PixelTypeDescriptor::from_pixel_type(pixel_type, true))
            .expect("every pixel type has a representation")
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(select(PixelType::Int8), Representation::Int8Bytes);
        assert_eq!(select(PixelType::Uint8), Representation::WidenedShort);
        assert_eq!(select(PixelType::Int16), Representation::WidenedShort);
        assert_eq!(select(PixelType::Uint16), Representation::WidenedInt32AsDouble);
        assert_eq!(select(PixelType::Int32), Representation::WidenedInt32AsDouble);
        assert_eq!(select(PixelType::Uint32), Representation::WidenedInt64);
        assert_eq!(select(PixelType::Float), Representation::Float32);
        assert_eq!(select(PixelType::Double), Representation::Float64);
    }

    #[test]
    fn test_signed_64bit_integer_is_widened_int64() {
        let descriptor = PixelTypeDescriptor::new(8, true, false, true);
        assert_eq!(select_representation(&descriptor), Ok(Representation::WidenedInt64));
    }

    #[test]
    fn test_unsupported_widths() {
        // uint64 would need a 128-bit signed slot
        assert_matches!(
            select_representation(&PixelTypeDescriptor::new(8, false, false, true)),
            Err(PixelError::UnsupportedWidth { bytes_per_pixel: 8, signed: false, .. })
        );
        assert_matches!(
            select_representation(&PixelTypeDescriptor::new(2, true, true, true)),
            Err(PixelError::UnsupportedWidth { floating_point: true, .. })
        );
        assert_matches!(
            select_representation(&PixelTypeDescriptor::new(3, true, false, true)),
            Err(PixelError::UnsupportedWidth { bytes_per_pixel: 3, .. })
        );
        assert_matches!(
            select_representation(&PixelTypeDescriptor::new(0, false, false, true)),
            Err(PixelError::UnsupportedWidth { bytes_per_pixel: 0, .. })
        );
    }
}
