//! DICOM pixel data extraction
//!
//! Uncompressed pixel data is taken as stored, in the byte order of the
//! transfer syntax. Compressed pixel data is decoded, which always yields
//! little-endian samples.

use anyhow::{Context, Result};
use dicom::dictionary_std::tags;
use dicom::pixeldata::PixelDecoder;
use tracing::trace;

use super::DicomFile;

/// Pixel data bytes and their byte order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBytes {
    pub data: Vec<u8>,
    pub little_endian: bool,
}

/// Extract pixel data from DICOM object, handling compression and endianness
pub fn extract_pixel_data(obj: &DicomFile, transfer_syntax_uid: &str) -> Result<PixelBytes> {
    let is_compressed = detect_compression(transfer_syntax_uid);
    trace!(transfer_syntax_uid, is_compressed, "extracting pixel data");

    if is_compressed {
        extract_decoded_pixel_data(obj)
    } else {
        extract_raw_pixel_data(obj, !is_big_endian(transfer_syntax_uid))
    }
}

/// Detect if transfer syntax uses compression
#[inline]
#[must_use]
pub fn detect_compression(uid: &str) -> bool {
    uid.contains("1.2.840.10008.1.2.4")   // JPEG family
        || uid.contains("1.2.840.10008.1.2.5")   // RLE lossless
        || uid.contains("JPEG2000")
}

#[inline]
#[must_use]
pub fn is_big_endian(uid: &str) -> bool {
    #[allow(deprecated)] // Explicit VR Big Endian is retired but still in use
    use dicom::dictionary_std::uids::EXPLICIT_VR_BIG_ENDIAN;

    uid == EXPLICIT_VR_BIG_ENDIAN
}

/// Take the stored pixel data bytes as they are
fn extract_raw_pixel_data(obj: &DicomFile, little_endian: bool) -> Result<PixelBytes> {
    let pixel_data_obj = obj
        .get(tags::PIXEL_DATA)
        .context("Missing pixel data")?;

    let data = pixel_data_obj
        .to_bytes()
        .context("Failed to get raw pixel data bytes")?
        .to_vec();

    Ok(PixelBytes { data, little_endian })
}

/// Decode compressed pixel data
fn extract_decoded_pixel_data(obj: &DicomFile) -> Result<PixelBytes> {
    let decoded_pixel_data = obj
        .decode_pixel_data()
        .context("Failed to decode pixel data")?;

    Ok(PixelBytes {
        data: decoded_pixel_data.data().to_vec(),
        little_endian: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_compression() {
        assert!(detect_compression("1.2.840.10008.1.2.4.50"));
        assert!(detect_compression("1.2.840.10008.1.2.4.90"));
        assert!(detect_compression("1.2.840.10008.1.2.5"));
        assert!(!detect_compression("1.2.840.10008.1.2"));
        assert!(!detect_compression("1.2.840.10008.1.2.1"));
        assert!(!detect_compression("1.2.840.10008.1.2.2"));
    }

    #[test]
    fn test_big_endian_transfer_syntax() {
        assert!(is_big_endian("1.2.840.10008.1.2.2"));
        assert!(!is_big_endian("1.2.840.10008.1.2.1"));
        assert!(!is_big_endian("1.2.840.10008.1.2"));
    }
}
