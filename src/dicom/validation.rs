use anyhow::{bail, Result};

use super::metadata::{BitDepth, DicomImageInfo, PhotometricInterpretation};

#[inline]
pub fn validate_photometric_samples(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
) -> Result<()> {
    if photometric_interpretation.samples_per_pixel() != Some(samples_per_pixel) {
        bail!(
            "Inconsistent photometric interpretation {:?} with samples per pixel {}",
            photometric_interpretation,
            samples_per_pixel
        );
    }

    Ok(())
}

#[inline]
pub fn validate_planar_configuration(
    planar_configuration: Option<u16>,
    samples_per_pixel: u16,
) -> Result<()> {
    match planar_configuration {
        None => Ok(()),
        Some(_) if samples_per_pixel == 1 => {
            bail!("Planar configuration should only be present for multi-sample images")
        }
        Some(0 | 1) => Ok(()),
        Some(other) => bail!("Unsupported planar configuration: {other}"),
    }
}

#[inline]
pub fn validate_bit_depth(bit_depth: BitDepth) -> Result<()> {
    if !matches!(bit_depth.allocated, 8 | 16 | 32) {
        bail!(
            "Unsupported bits allocated: {} (expected 8, 16, or 32)",
            bit_depth.allocated
        );
    }

    if bit_depth.stored == 0 || bit_depth.stored > bit_depth.allocated {
        bail!("Invalid bits stored: {bit_depth}");
    }

    Ok(())
}

#[inline]
pub fn validate_pixel_representation(pixel_representation: u16) -> Result<()> {
    if pixel_representation > 1 {
        bail!("Invalid pixel representation: {pixel_representation} (expected 0 or 1)");
    }
    Ok(())
}

/// Check that the pixel data covers every frame
pub fn validate_pixel_data_len(info: &DicomImageInfo, len: usize) -> Result<()> {
    let expected = info.frame_len() * info.number_of_frames as usize;
    if len < expected {
        bail!(
            "Invalid pixel data size: expected {} bytes for {} frame(s), got {}",
            expected,
            info.number_of_frames,
            len
        );
    }
    Ok(())
}

pub fn validate_info(info: &DicomImageInfo) -> Result<()> {
    validate_photometric_samples(&info.photometric_interpretation, info.samples_per_pixel)?;
    validate_planar_configuration(info.planar_configuration, info.samples_per_pixel)?;
    validate_bit_depth(info.bit_depth)?;
    validate_pixel_representation(info.pixel_representation)?;
    if info.dimensions.pixel_count() == 0 {
        bail!("Invalid image dimensions: {}", info.dimensions);
    }
    Ok(())
}
