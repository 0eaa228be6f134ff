//! Pixel type descriptors and plane regions

use std::fmt;

use crate::pixels::PixelError;

/// Source pixel type of an image plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float,
    Double,
}

impl PixelType {
    /// Pick the pixel type for a storage width and signedness
    #[must_use]
    pub fn from_parts(bytes_per_pixel: usize, signed: bool, floating_point: bool) -> Option<Self> {
        Some(match (bytes_per_pixel, signed, floating_point) {
            (4, _, true) => Self::Float,
            (8, _, true) => Self::Double,
            (1, true, false) => Self::Int8,
            (1, false, false) => Self::Uint8,
            (2, true, false) => Self::Int16,
            (2, false, false) => Self::Uint16,
            (4, true, false) => Self::Int32,
            (4, false, false) => Self::Uint32,
            _ => return None,
        })
    }

    #[inline]
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float => 4,
            Self::Double => 8,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_signed(self) -> bool {
        !matches!(self, Self::Uint8 | Self::Uint16 | Self::Uint32)
    }

    #[inline]
    #[must_use]
    pub fn is_floating_point(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Nominal integer range of the type, `None` for floating point types
    #[must_use]
    pub fn default_min_max(self) -> Option<(i64, i64)> {
        match self {
            Self::Int8 => Some((i64::from(i8::MIN), i64::from(i8::MAX))),
            Self::Uint8 => Some((0, i64::from(u8::MAX))),
            Self::Int16 => Some((i64::from(i16::MIN), i64::from(i16::MAX))),
            Self::Uint16 => Some((0, i64::from(u16::MAX))),
            Self::Int32 => Some((i64::from(i32::MIN), i64::from(i32::MAX))),
            Self::Uint32 => Some((0, i64::from(u32::MAX))),
            Self::Float | Self::Double => None,
        }
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Float => "float",
            Self::Double => "double",
        };
        f.write_str(name)
    }
}

/// Encoding of the samples in one plane buffer
///
/// A floating point descriptor is always signed; [`PixelTypeDescriptor::new`]
/// enforces that regardless of the flag passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelTypeDescriptor {
    pub bytes_per_pixel: usize,
    pub signed: bool,
    pub floating_point: bool,
    pub true_bit_depth: u32,
    pub little_endian: bool,
}

impl PixelTypeDescriptor {
    /// Descriptor with the true bit depth set to the full storage width
    #[must_use]
    pub fn new(bytes_per_pixel: usize, signed: bool, floating_point: bool, little_endian: bool) -> Self {
        Self {
            bytes_per_pixel,
            signed: signed || floating_point,
            floating_point,
            true_bit_depth: storage_bits(bytes_per_pixel),
            little_endian,
        }
    }

    #[must_use]
    pub fn from_pixel_type(pixel_type: PixelType, little_endian: bool) -> Self {
        Self::new(
            pixel_type.bytes_per_pixel(),
            pixel_type.is_signed(),
            pixel_type.is_floating_point(),
            little_endian,
        )
    }

    #[must_use]
    pub fn with_true_bit_depth(mut self, bits: u32) -> Self {
        self.true_bit_depth = bits;
        self
    }

    #[inline]
    #[must_use]
    pub fn storage_bits(&self) -> u32 {
        storage_bits(self.bytes_per_pixel)
    }

    #[must_use]
    pub fn pixel_type(&self) -> Option<PixelType> {
        PixelType::from_parts(self.bytes_per_pixel, self.signed, self.floating_point)
    }

    /// Check the width and true bit depth
    ///
    /// # Errors
    ///
    /// Returns [`PixelError::UnsupportedWidth`] for widths outside {1, 2, 4, 8}
    /// and [`PixelError::InvalidBitDepth`] when the true bit depth is zero or
    /// wider than the storage
    pub fn validate(&self) -> Result<(), PixelError> {
        if !matches!(self.bytes_per_pixel, 1 | 2 | 4 | 8) {
            return Err(PixelError::UnsupportedWidth {
                bytes_per_pixel: self.bytes_per_pixel,
                signed: self.signed,
                floating_point: self.floating_point,
            });
        }

        if self.true_bit_depth == 0 || self.true_bit_depth > self.storage_bits() {
            return Err(PixelError::InvalidBitDepth {
                bits: self.true_bit_depth,
                bytes_per_pixel: self.bytes_per_pixel,
            });
        }

        Ok(())
    }
}

#[inline]
fn storage_bits(bytes_per_pixel: usize) -> u32 {
    u32::try_from(bytes_per_pixel.saturating_mul(8)).unwrap_or(u32::MAX)
}

impl fmt::Display for PixelTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.floating_point {
            "float"
        } else if self.signed {
            "int"
        } else {
            "uint"
        };
        let endian = if self.little_endian { "LE" } else { "BE" };
        write!(
            f,
            "{kind}{bits} ({true_bits} significant bits, {endian})",
            bits = self.storage_bits(),
            true_bits = self.true_bit_depth,
        )
    }
}

/// Rectangular region of one image plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    #[must_use]
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// Region covering a whole plane
    #[must_use]
    pub fn full(size_x: usize, size_y: usize) -> Self {
        Self::new(0, 0, size_x, size_y)
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Returns true if the region lies within a plane of the given size
    #[inline]
    #[must_use]
    pub fn fits_within(&self, size_x: usize, size_y: usize) -> bool {
        self.x.checked_add(self.width).is_some_and(|end| end <= size_x)
            && self.y.checked_add(self.height).is_some_and(|end| end <= size_y)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{width}x{height}+{x}+{y}",
            width = self.width,
            height = self.height,
            x = self.x,
            y = self.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_floating_point_forces_signed() {
        let descriptor = PixelTypeDescriptor::new(4, false, true, true);
        assert!(descriptor.signed);
        assert_eq!(descriptor.pixel_type(), Some(PixelType::Float));
    }

    #[test]
    fn test_true_bit_depth_defaults_to_storage() {
        let descriptor = PixelTypeDescriptor::from_pixel_type(PixelType::Uint16, false);
        assert_eq!(descriptor.true_bit_depth, 16);
        assert!(!descriptor.little_endian);
        assert_eq!(descriptor.to_string(), "uint16 (16 significant bits, BE)");
    }

    #[test]
    fn test_validate_rejects_odd_widths_and_depths() {
        assert_matches!(
            PixelTypeDescriptor::new(3, true, false, true).validate(),
            Err(PixelError::UnsupportedWidth { bytes_per_pixel: 3, .. })
        );
        assert_matches!(
            PixelTypeDescriptor::new(2, false, false, true)
                .with_true_bit_depth(17)
                .validate(),
            Err(PixelError::InvalidBitDepth { bits: 17, bytes_per_pixel: 2 })
        );
        assert_matches!(
            PixelTypeDescriptor::new(2, false, false, true)
                .with_true_bit_depth(0)
                .validate(),
            Err(PixelError::InvalidBitDepth { bits: 0, .. })
        );
        assert!(PixelTypeDescriptor::new(2, false, false, true)
            .with_true_bit_depth(12)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_default_min_max() {
        assert_eq!(PixelType::Int8.default_min_max(), Some((-128, 127)));
        assert_eq!(PixelType::Uint32.default_min_max(), Some((0, 4_294_967_295)));
        assert_eq!(PixelType::Double.default_min_max(), None);
    }

    #[test]
    fn test_region_bounds() {
        let region = Region::new(2, 1, 3, 2);
        assert_eq!(region.pixel_count(), 6);
        assert!(region.fits_within(5, 3));
        assert!(!region.fits_within(4, 3));
        assert!(!Region::new(usize::MAX, 0, 1, 1).fits_within(10, 10));
        assert_eq!(region.to_string(), "3x2+2+1");
    }
}
