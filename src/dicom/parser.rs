use std::str::FromStr;

use anyhow::{Context, Result};
use dicom::core::dictionary::UidDictionary;
use dicom::core::Tag;
use dicom::dictionary_std::sop_class;
use dicom::dictionary_std::tags;
use dicom::encoding::TransferSyntaxIndex;
use dicom::transfer_syntax::TransferSyntaxRegistry;

use super::metadata::{
    BitDepth, DicomImageInfo, Dimensions, PhotometricInterpretation, SOPClass, TransferSyntax,
};
use super::validation;
use super::DicomFile;

/// Partial metadata for error message context
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub modality: Option<String>,
    pub sop_class: Option<SOPClass>,
}

impl ErrorContext {
    pub fn format_error(&self, tag_name: &str) -> String {
        let mut parts = Vec::new();

        if let Some(modality) = &self.modality {
            parts.push(format!("Modality: {modality}"));
        }

        if let Some(sc) = &self.sop_class {
            parts.push(format!("SOP Class: {sc}"));
        }

        if parts.is_empty() {
            format!("Missing or invalid {tag_name} tag")
        } else {
            format!(
                "Missing or invalid {tag_name} tag - this may be a non-image DICOM file ({})",
                parts.join(", ")
            )
        }
    }
}

impl From<&DicomFile> for ErrorContext {
    fn from(obj: &DicomFile) -> Self {
        ErrorContext {
            modality: extract_text(obj, tags::MODALITY),
            sop_class: extract_sop_class(obj),
        }
    }
}

/// Read the image description and check it is one this crate can serve
pub fn extract_image_info(obj: &DicomFile) -> Result<DicomImageInfo> {
    let error_context = ErrorContext::from(obj);

    let info = DicomImageInfo {
        dimensions: extract_dimensions(obj, &error_context)?,
        number_of_frames: extract_number_of_frames(obj),
        samples_per_pixel: extract_samples_per_pixel(obj),
        bit_depth: extract_bit_depth(obj, &error_context)?,
        pixel_representation: extract_pixel_representation(obj),
        planar_configuration: extract_planar_configuration(obj),
        photometric_interpretation: extract_photometric_interpretation(obj),
        transfer_syntax: extract_transfer_syntax(obj),
        sop_class: error_context.sop_class.clone(),
    };

    validation::validate_info(&info).context("Unsupported DICOM image")?;

    Ok(info)
}

pub fn extract_dimensions(obj: &DicomFile, error_context: &ErrorContext) -> Result<Dimensions> {
    let rows = obj
        .get(tags::ROWS)
        .and_then(|e| e.to_int::<u16>().ok())
        .with_context(|| error_context.format_error("Rows"))?;

    let cols = obj
        .get(tags::COLUMNS)
        .and_then(|e| e.to_int::<u16>().ok())
        .with_context(|| error_context.format_error("Columns"))?;

    Ok(Dimensions::new(rows, cols))
}

#[inline]
pub fn extract_number_of_frames(obj: &DicomFile) -> u32 {
    obj.get(tags::NUMBER_OF_FRAMES)
        .and_then(|e| e.to_int::<u32>().ok())
        .unwrap_or(1)
}

#[inline]
pub fn extract_samples_per_pixel(obj: &DicomFile) -> u16 {
    obj.get(tags::SAMPLES_PER_PIXEL)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(1)
}

pub fn extract_bit_depth(obj: &DicomFile, error_context: &ErrorContext) -> Result<BitDepth> {
    let allocated = obj
        .get(tags::BITS_ALLOCATED)
        .and_then(|e| e.to_int::<u16>().ok())
        .with_context(|| error_context.format_error("Bits Allocated"))?;

    // Bits Stored defaults to the allocated width when absent
    let stored = obj
        .get(tags::BITS_STORED)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(allocated);

    Ok(BitDepth::new(allocated, stored))
}

#[inline]
pub fn extract_pixel_representation(obj: &DicomFile) -> u16 {
    obj.get(tags::PIXEL_REPRESENTATION)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(0)
}

#[inline]
pub fn extract_planar_configuration(obj: &DicomFile) -> Option<u16> {
    obj.get(tags::PLANAR_CONFIGURATION)
        .and_then(|e| e.to_int::<u16>().ok())
}

pub fn extract_photometric_interpretation(obj: &DicomFile) -> PhotometricInterpretation {
    extract_text(obj, tags::PHOTOMETRIC_INTERPRETATION)
        .and_then(|s| PhotometricInterpretation::from_str(&s).ok())
        .unwrap_or(PhotometricInterpretation::Monochrome2)
}

pub fn extract_transfer_syntax(obj: &DicomFile) -> TransferSyntax {
    let uid = obj
        .meta()
        .transfer_syntax()
        .trim_end_matches('\0')
        .to_string();
    let name = TransferSyntaxRegistry
        .get(&uid)
        .map_or_else(|| "Unknown".to_string(), |ts| ts.name().to_string());

    TransferSyntax::new(uid, name)
}

pub fn extract_sop_class(obj: &DicomFile) -> Option<SOPClass> {
    obj.get(tags::SOP_CLASS_UID)
        .and_then(|e| e.value().to_str().ok())
        .and_then(|uid| {
            let uid = uid.trim_end_matches('\0');
            sop_class::StandardSopClassDictionary
                .by_uid(uid)
                .map(|entry| SOPClass::new(uid.to_string(), entry.name.to_string()))
        })
}

#[inline]
pub fn extract_text(obj: &DicomFile, tag: Tag) -> Option<String> {
    obj.get(tag)
        .and_then(|e| e.value().to_str().ok())
        .map(|s| s.to_string())
}

/// Core image fields, always part of the metadata store
pub fn core_entries(info: &DicomImageInfo) -> Vec<(String, String)> {
    let mut entries = vec![
        ("Rows".to_string(), info.dimensions.rows.to_string()),
        ("Columns".to_string(), info.dimensions.cols.to_string()),
        ("Number of Frames".to_string(), info.number_of_frames.to_string()),
        ("Samples per Pixel".to_string(), info.samples_per_pixel.to_string()),
        ("Bits Allocated".to_string(), info.bit_depth.allocated.to_string()),
        ("Bits Stored".to_string(), info.bit_depth.stored.to_string()),
        ("Pixel Representation".to_string(), info.pixel_representation.to_string()),
        (
            "Photometric Interpretation".to_string(),
            info.photometric_interpretation.to_string(),
        ),
        ("Transfer Syntax".to_string(), info.transfer_syntax.to_string()),
    ];

    if let Some(sop_class) = &info.sop_class {
        entries.push(("SOP Class UID".to_string(), sop_class.to_string()));
    }
    if let Some(planar) = info.planar_configuration {
        entries.push(("Planar Configuration".to_string(), planar.to_string()));
    }

    entries
}

/// Patient, study and series fields of the file
pub fn original_entries(obj: &DicomFile) -> Vec<(String, String)> {
    let text_fields = [
        ("Patient Name", tags::PATIENT_NAME),
        ("Patient ID", tags::PATIENT_ID),
        ("Birth Date", tags::PATIENT_BIRTH_DATE),
        ("Accession Number", tags::ACCESSION_NUMBER),
        ("Study Date", tags::STUDY_DATE),
        ("Study Description", tags::STUDY_DESCRIPTION),
        ("Modality", tags::MODALITY),
        ("Series Description", tags::SERIES_DESCRIPTION),
        ("Pixel Aspect Ratio", tags::PIXEL_ASPECT_RATIO),
    ];

    let mut entries: Vec<(String, String)> = text_fields
        .into_iter()
        .filter_map(|(name, tag)| extract_text(obj, tag).map(|v| (name.to_string(), v)))
        .collect();

    let numeric_fields = [
        ("Slice Thickness", tags::SLICE_THICKNESS),
        ("Rescale Slope", tags::RESCALE_SLOPE),
        ("Rescale Intercept", tags::RESCALE_INTERCEPT),
    ];

    entries.extend(numeric_fields.into_iter().filter_map(|(name, tag)| {
        obj.get(tag)
            .and_then(|e| e.to_float64().ok())
            .map(|v| (name.to_string(), v.to_string()))
    }));

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dicom::metadata::test_info;

    #[test]
    fn test_error_context_messages() {
        assert_eq!(
            ErrorContext::default().format_error("Rows"),
            "Missing or invalid Rows tag"
        );

        let context = ErrorContext {
            modality: Some("RTSTRUCT".to_string()),
            sop_class: None,
        };
        assert_eq!(
            context.format_error("Rows"),
            "Missing or invalid Rows tag - this may be a non-image DICOM file (Modality: RTSTRUCT)"
        );
    }

    #[test]
    fn test_core_entries() {
        let info = test_info(3, 4, 2, 3, 16, Some(1));
        let entries = core_entries(&info);

        let get = |key: &str| {
            entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("Rows"), Some("3"));
        assert_eq!(get("Columns"), Some("4"));
        assert_eq!(get("Number of Frames"), Some("2"));
        assert_eq!(get("Photometric Interpretation"), Some("RGB"));
        assert_eq!(get("Planar Configuration"), Some("1"));
        assert_eq!(
            get("Transfer Syntax"),
            Some("Explicit VR Little Endian (1.2.840.10008.1.2.1)")
        );
        assert_eq!(get("SOP Class UID"), None);
    }
}
