//! Min-max normalization of plane buffers into [0, 1]

use super::decode::{check_length, ordered};
use super::error::Result;
use super::promotion::{Representation, select_representation};
use crate::types::PixelTypeDescriptor;

/// Normalize a plane buffer so the range minimum maps to 0.0 and the
/// range maximum maps to 1.0
///
/// Floating point samples are scaled by the minimum and maximum of their
/// finite values; positive and negative infinity map to 1.0 and 0.0.
/// Integer samples are scaled by the nominal range of their type, with the
/// maximum lowered to `2^true_bit_depth - 1` for unsigned data stored in a
/// wider word.
///
/// A degenerate range (a single distinct value, or no finite float sample)
/// maps every finite sample to 0.0.
///
/// # Errors
///
/// Returns [`PixelError::UnsupportedWidth`] for descriptors with no output
/// representation (floats other than 4 or 8 bytes, unsigned 64-bit integers),
/// [`PixelError::InvalidBitDepth`] for a true bit depth outside the storage
/// width and [`PixelError::Decode`] if the buffer length is not a multiple of
/// the pixel width
///
/// [`PixelError::UnsupportedWidth`]: super::PixelError::UnsupportedWidth
/// [`PixelError::InvalidBitDepth`]: super::PixelError::InvalidBitDepth
/// [`PixelError::Decode`]: super::PixelError::Decode
pub fn normalize(buffer: &[u8], descriptor: &PixelTypeDescriptor) -> Result<Vec<f64>> {
    descriptor.validate()?;
    let representation = select_representation(descriptor)?;
    check_length(buffer, descriptor.bytes_per_pixel)?;

    let little = descriptor.little_endian;
    Ok(match representation {
        Representation::Float32 => normalize_float(
            buffer
                .chunks_exact(4)
                .map(|chunk| f64::from(f32::from_le_bytes(ordered(chunk, little))))
                .collect(),
        ),
        Representation::Float64 => normalize_float(
            buffer
                .chunks_exact(8)
                .map(|chunk| f64::from_le_bytes(ordered(chunk, little)))
                .collect(),
        ),
        _ => normalize_integer(buffer, descriptor),
    })
}

fn normalize_float(mut data: Vec<f64>) -> Vec<f64> {
    let (min, max) = finite_min_max(&data).unwrap_or((0.0, 0.0));

    // A span wider than f64::MAX overflows; halving every term keeps it finite
    let halve = !(max - min).is_finite();
    let (min, range) = if halve {
        (min / 2.0, max / 2.0 - min / 2.0)
    } else {
        (min, max - min)
    };

    for value in &mut data {
        *value = if *value == f64::INFINITY {
            1.0
        } else if *value == f64::NEG_INFINITY {
            0.0
        } else if halve {
            scale(*value / 2.0, min, range)
        } else {
            scale(*value, min, range)
        };
    }

    data
}

fn normalize_integer(buffer: &[u8], descriptor: &PixelTypeDescriptor) -> Vec<f64> {
    let (min, max) = integer_range(descriptor);
    let range = max - min;
    let little = descriptor.little_endian;

    buffer
        .chunks_exact(descriptor.bytes_per_pixel)
        .map(|chunk| scale(integer_sample(chunk, descriptor.signed, little), min, range))
        .collect()
}

/// Minimum and maximum over the finite values, `None` if there are none
#[inline]
#[must_use]
pub fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, val| match acc {
            None => Some((val, val)),
            Some((min, max)) => Some((min.min(val), max.max(val))),
        })
}

/// Nominal range of an integer descriptor after the true bit depth override
#[must_use]
pub fn integer_range(descriptor: &PixelTypeDescriptor) -> (f64, f64) {
    let bits = descriptor.storage_bits();

    if descriptor.signed {
        let half = 2f64.powi(bits as i32 - 1);
        (-half, half - 1.0)
    } else if descriptor.true_bit_depth < bits {
        (0.0, 2f64.powi(descriptor.true_bit_depth as i32) - 1.0)
    } else {
        (0.0, 2f64.powi(bits as i32) - 1.0)
    }
}

#[inline(always)]
fn scale(value: f64, min: f64, range: f64) -> f64 {
    if range == 0.0 && value.is_finite() {
        return 0.0;
    }
    (value - min) / range
}

/// Read one integer sample, sign-extended when the source is signed
#[inline(always)]
fn integer_sample(chunk: &[u8], signed: bool, little: bool) -> f64 {
    match (chunk.len(), signed) {
        (1, true) => f64::from(i8::from_le_bytes(ordered(chunk, little))),
        (1, false) => f64::from(chunk[0]),
        (2, true) => f64::from(i16::from_le_bytes(ordered(chunk, little))),
        (2, false) => f64::from(u16::from_le_bytes(ordered(chunk, little))),
        (4, true) => f64::from(i32::from_le_bytes(ordered(chunk, little))),
        (4, false) => f64::from(u32::from_le_bytes(ordered(chunk, little))),
        // Unsigned 64-bit has no representation and never reaches here
        _ => i64::from_le_bytes(ordered(chunk, little)) as f64,
    }
}
