//! Raw decoding of plane buffers into their promoted representation

use super::error::{PixelError, Result};
use super::promotion::{select_representation, Representation};
use crate::types::PixelTypeDescriptor;

/// Decoded samples of one plane region
#[derive(Debug, Clone, PartialEq)]
pub enum PixelArray {
    Int8Bytes(Vec<i8>),
    WidenedShort(Vec<i16>),
    Float32(Vec<f32>),
    WidenedInt32AsDouble(Vec<f64>),
    Float64(Vec<f64>),
    WidenedInt64(Vec<i64>),
}

impl PixelArray {
    #[must_use]
    pub fn representation(&self) -> Representation {
        match self {
            Self::Int8Bytes(_) => Representation::Int8Bytes,
            Self::WidenedShort(_) => Representation::WidenedShort,
            Self::Float32(_) => Representation::Float32,
            Self::WidenedInt32AsDouble(_) => Representation::WidenedInt32AsDouble,
            Self::Float64(_) => Representation::Float64,
            Self::WidenedInt64(_) => Representation::WidenedInt64,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int8Bytes(v) => v.len(),
            Self::WidenedShort(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::WidenedInt32AsDouble(v) | Self::Float64(v) => v.len(),
            Self::WidenedInt64(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode a plane buffer without changing any sample value
///
/// # Errors
///
/// Returns [`PixelError::UnsupportedWidth`] if the descriptor has no
/// representation and [`PixelError::Decode`] if the buffer length is not a
/// multiple of the pixel width
pub fn decode_raw(buffer: &[u8], descriptor: &PixelTypeDescriptor) -> Result<PixelArray> {
    let representation = select_representation(descriptor)?;
    check_length(buffer, descriptor.bytes_per_pixel)?;

    let bpp = descriptor.bytes_per_pixel;
    let little = descriptor.little_endian;
    let samples = buffer.chunks_exact(bpp);

    Ok(match representation {
        Representation::Int8Bytes => {
            PixelArray::Int8Bytes(buffer.iter().map(|&b| i8::from_le_bytes([b])).collect())
        }
        Representation::WidenedShort => PixelArray::WidenedShort(if bpp == 1 {
            buffer.iter().map(|&b| i16::from(b)).collect()
        } else {
            samples
                .map(|chunk| i16::from_le_bytes(ordered(chunk, little)))
                .collect()
        }),
        Representation::Float32 => PixelArray::Float32(
            samples
                .map(|chunk| f32::from_le_bytes(ordered(chunk, little)))
                .collect(),
        ),
        Representation::WidenedInt32AsDouble => PixelArray::WidenedInt32AsDouble(if descriptor.signed {
            samples
                .map(|chunk| f64::from(i32::from_le_bytes(ordered(chunk, little))))
                .collect()
        } else {
            samples
                .map(|chunk| f64::from(u16::from_le_bytes(ordered(chunk, little))))
                .collect()
        }),
        Representation::Float64 => PixelArray::Float64(
            samples
                .map(|chunk| f64::from_le_bytes(ordered(chunk, little)))
                .collect(),
        ),
        Representation::WidenedInt64 => PixelArray::WidenedInt64(if descriptor.signed {
            samples
                .map(|chunk| i64::from_le_bytes(ordered(chunk, little)))
                .collect()
        } else {
            samples
                .map(|chunk| i64::from(u32::from_le_bytes(ordered(chunk, little))))
                .collect()
        }),
    })
}

/// Fail unless the buffer holds a whole number of samples
#[inline]
pub(super) fn check_length(buffer: &[u8], bytes_per_pixel: usize) -> Result<()> {
    if bytes_per_pixel == 0 || !buffer.len().is_multiple_of(bytes_per_pixel) {
        return Err(PixelError::Decode {
            len: buffer.len(),
            bytes_per_pixel,
        });
    }
    Ok(())
}

/// Copy one sample into little-endian byte order
///
/// `chunk` must be exactly `N` bytes long.
#[inline(always)]
pub(super) fn ordered<const N: usize>(chunk: &[u8], little_endian: bool) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(chunk);
    if !little_endian {
        bytes.reverse();
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelType;
    use assert_matches::assert_matches;

    fn le(pixel_type: PixelType) -> PixelTypeDescriptor {
        PixelTypeDescriptor::from_pixel_type(pixel_type, true)
    }

    fn be(pixel_type: PixelType) -> PixelTypeDescriptor {
        PixelTypeDescriptor::from_pixel_type(pixel_type, false)
    }

    #[test]
    fn test_int8_passes_bytes_through() {
        let decoded = decode_raw(&[0x00, 0x7f, 0x80, 0xff], &le(PixelType::Int8)).unwrap();
        assert_eq!(decoded, PixelArray::Int8Bytes(vec![0, 127, -128, -1]));
    }

    #[test]
    fn test_uint8_widens_to_short() {
        let decoded = decode_raw(&[0, 1, 200, 255], &le(PixelType::Uint8)).unwrap();
        assert_eq!(decoded, PixelArray::WidenedShort(vec![0, 1, 200, 255]));
    }

    #[test]
    fn test_int16_both_endians() {
        let values = [i16::MIN, -2, 0, 1234, i16::MAX];
        let little: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let big: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();

        assert_eq!(
            decode_raw(&little, &le(PixelType::Int16)).unwrap(),
            PixelArray::WidenedShort(values.to_vec())
        );
        assert_eq!(
            decode_raw(&big, &be(PixelType::Int16)).unwrap(),
            PixelArray::WidenedShort(values.to_vec())
        );
    }

    #[test]
    fn test_uint16_widens_to_double() {
        let values = [0u16, 4095, u16::MAX];
        let big: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();

        assert_eq!(
            decode_raw(&big, &be(PixelType::Uint16)).unwrap(),
            PixelArray::WidenedInt32AsDouble(vec![0.0, 4095.0, 65535.0])
        );
    }

    #[test]
    fn test_int32_never_decodes_to_native_int() {
        let values = [i32::MIN, -1, 0, i32::MAX];
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();

        let decoded = decode_raw(&bytes, &le(PixelType::Int32)).unwrap();
        assert_eq!(decoded.representation(), Representation::WidenedInt32AsDouble);
        assert_eq!(
            decoded,
            PixelArray::WidenedInt32AsDouble(vec![-2_147_483_648.0, -1.0, 0.0, 2_147_483_647.0])
        );
    }

    #[test]
    fn test_uint32_max_stays_positive() {
        let decoded = decode_raw(&u32::MAX.to_le_bytes(), &le(PixelType::Uint32)).unwrap();
        assert_eq!(decoded, PixelArray::WidenedInt64(vec![4_294_967_295]));

        let decoded = decode_raw(&u32::MAX.to_be_bytes(), &be(PixelType::Uint32)).unwrap();
        assert_eq!(decoded, PixelArray::WidenedInt64(vec![4_294_967_295]));
    }

    #[test]
    fn test_signed_int64() {
        let descriptor = PixelTypeDescriptor::new(8, true, false, false);
        let decoded = decode_raw(&(-42i64).to_be_bytes(), &descriptor).unwrap();
        assert_eq!(decoded, PixelArray::WidenedInt64(vec![-42]));
    }

    #[test]
    fn test_floats() {
        let values = [f32::NEG_INFINITY, -1.5, 0.25, f32::MAX];
        let big: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        assert_eq!(
            decode_raw(&big, &be(PixelType::Float)).unwrap(),
            PixelArray::Float32(values.to_vec())
        );

        let values = [f64::MIN_POSITIVE, -3.75, 1e300];
        let little: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        assert_eq!(
            decode_raw(&little, &le(PixelType::Double)).unwrap(),
            PixelArray::Float64(values.to_vec())
        );
    }

    #[test]
    fn test_output_length_matches_sample_count() {
        let buffer = [0u8; 64];
        for pixel_type in [
            PixelType::Int8,
            PixelType::Uint8,
            PixelType::Int16,
            PixelType::Uint16,
            PixelType::Int32,
            PixelType::Uint32,
        ] {
            let decoded = decode_raw(&buffer, &le(pixel_type)).unwrap();
            assert_eq!(decoded.len(), 64 / pixel_type.bytes_per_pixel(), "{pixel_type}");
        }
        let int64 = PixelTypeDescriptor::new(8, true, false, true);
        assert_eq!(decode_raw(&buffer, &int64).unwrap().len(), 8);
    }

    #[test]
    fn test_empty_buffer() {
        let decoded = decode_raw(&[], &le(PixelType::Uint16)).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_truncated_buffer_is_decode_error() {
        assert_matches!(
            decode_raw(&[0u8; 7], &le(PixelType::Uint16)),
            Err(PixelError::Decode { len: 7, bytes_per_pixel: 2 })
        );
    }
}
