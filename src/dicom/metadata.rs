//! Image description extracted from a DICOM file

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};

use crate::types::PixelType;

/// DICOM transfer syntax (UID, name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSyntax {
    pub uid: String,
    pub name: String,
}

impl TransferSyntax {
    #[must_use]
    pub fn new(uid: String, name: String) -> Self {
        Self { uid, name }
    }
}

impl fmt::Display for TransferSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{name} ({uid})", name = self.name, uid = self.uid)
    }
}

/// SOP Class (UID, name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SOPClass {
    pub uid: String,
    pub name: String,
}

impl SOPClass {
    #[must_use]
    pub fn new(uid: String, name: String) -> Self {
        Self { uid, name }
    }
}

impl fmt::Display for SOPClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{name} ({uid})", name = self.name, uid = self.uid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: u16,
    pub cols: u16,
}

impl Dimensions {
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{cols}x{rows}", cols = self.cols, rows = self.rows)
    }
}

/// Bit depth information for pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitDepth {
    pub allocated: u16,
    pub stored: u16,
}

impl BitDepth {
    #[must_use]
    pub fn new(allocated: u16, stored: u16) -> Self {
        Self { allocated, stored }
    }

    #[inline]
    #[must_use]
    pub fn bytes_per_sample(&self) -> usize {
        usize::from(self.allocated / 8)
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{stored}/{allocated} bits",
            stored = self.stored,
            allocated = self.allocated
        )
    }
}

/// How samples of a multi-sample pixel are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleLayout {
    /// RGBRGB...
    Interleaved,
    /// RRR...GGG...BBB...
    Planar,
}

/// Photometric interpretation (0028,0004)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotometricInterpretation {
    Monochrome1,
    Monochrome2,
    Rgb,
    YbrFull,
    YbrFull422,
    Palette,
    Unknown(String),
}

impl PhotometricInterpretation {
    /// Samples per pixel this interpretation requires, `None` when unknown
    #[must_use]
    pub fn samples_per_pixel(&self) -> Option<u16> {
        match self {
            Self::Monochrome1 | Self::Monochrome2 | Self::Palette => Some(1),
            Self::Rgb | Self::YbrFull | Self::YbrFull422 => Some(3),
            Self::Unknown(_) => None,
        }
    }

    fn keyword(&self) -> &str {
        match self {
            Self::Monochrome1 => "MONOCHROME1",
            Self::Monochrome2 => "MONOCHROME2",
            Self::Rgb => "RGB",
            Self::YbrFull => "YBR_FULL",
            Self::YbrFull422 => "YBR_FULL_422",
            Self::Palette => "PALETTE COLOR",
            Self::Unknown(keyword) => keyword,
        }
    }
}

impl FromStr for PhotometricInterpretation {
    type Err = Infallible;

    /// Code strings are padded with spaces or NUL to an even length
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keyword = s.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        Ok(match keyword {
            "MONOCHROME1" => Self::Monochrome1,
            "MONOCHROME2" => Self::Monochrome2,
            "RGB" => Self::Rgb,
            "YBR_FULL" => Self::YbrFull,
            "YBR_FULL_422" => Self::YbrFull422,
            "PALETTE COLOR" => Self::Palette,
            other => Self::Unknown(other.to_string()),
        })
    }
}

impl fmt::Display for PhotometricInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Image geometry and pixel encoding of a DICOM object
#[derive(Debug, Clone, PartialEq)]
pub struct DicomImageInfo {
    pub dimensions: Dimensions,
    pub number_of_frames: u32,
    pub samples_per_pixel: u16,
    pub bit_depth: BitDepth,
    /// 0 = unsigned, 1 = two's complement
    pub pixel_representation: u16,
    pub planar_configuration: Option<u16>,
    pub photometric_interpretation: PhotometricInterpretation,
    pub transfer_syntax: TransferSyntax,
    pub sop_class: Option<SOPClass>,
}

impl DicomImageInfo {
    #[inline]
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.pixel_representation == 1
    }

    /// Source pixel type of one sample
    ///
    /// # Errors
    ///
    /// Returns an error if bits allocated is not 8, 16 or 32
    pub fn pixel_type(&self) -> Result<PixelType> {
        match PixelType::from_parts(self.bit_depth.bytes_per_sample(), self.is_signed(), false) {
            Some(pixel_type) if self.bit_depth.allocated % 8 == 0 => Ok(pixel_type),
            _ => bail!(
                "Unsupported bits allocated: {} (expected 8, 16, or 32)",
                self.bit_depth.allocated
            ),
        }
    }

    /// Number of single-channel planes (frames times samples per pixel)
    #[inline]
    #[must_use]
    pub fn plane_count(&self) -> usize {
        self.number_of_frames as usize * usize::from(self.samples_per_pixel)
    }

    /// Bytes of one frame with all of its samples
    #[inline]
    #[must_use]
    pub fn frame_len(&self) -> usize {
        self.dimensions.pixel_count()
            * usize::from(self.samples_per_pixel)
            * self.bit_depth.bytes_per_sample()
    }

    #[must_use]
    pub fn sample_layout(&self) -> SampleLayout {
        match self.planar_configuration {
            Some(1) => SampleLayout::Planar,
            _ => SampleLayout::Interleaved,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_info(
    rows: u16,
    cols: u16,
    frames: u32,
    samples_per_pixel: u16,
    bits_allocated: u16,
    planar_configuration: Option<u16>,
) -> DicomImageInfo {
    DicomImageInfo {
        dimensions: Dimensions::new(rows, cols),
        number_of_frames: frames,
        samples_per_pixel,
        bit_depth: BitDepth::new(bits_allocated, bits_allocated),
        pixel_representation: 0,
        planar_configuration,
        photometric_interpretation: if samples_per_pixel == 3 {
            PhotometricInterpretation::Rgb
        } else {
            PhotometricInterpretation::Monochrome2
        },
        transfer_syntax: TransferSyntax::new(
            "1.2.840.10008.1.2.1".to_string(),
            "Explicit VR Little Endian".to_string(),
        ),
        sop_class: None,
    }
}
