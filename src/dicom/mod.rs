//! DICOM-backed plane reader
//!
//! Opens a DICOM file with the `dicom` crates and serves its frames as
//! single-channel planes. Multi-sample pixels (RGB, YCbCr) are split into one
//! plane per sample, so plane `c + samples_per_pixel * frame` holds sample `c`
//! of frame `frame`.

mod metadata;
mod parser;
mod pixel_data;
mod validation;

pub use metadata::{
    BitDepth, DicomImageInfo, Dimensions, PhotometricInterpretation, SOPClass, SampleLayout,
    TransferSyntax,
};

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use dicom::object::{FileDicomObject, InMemDicomObject, StandardDataDictionary, open_file};
use tracing::{debug, trace};

use crate::session::{self, PlaneReader, Session, SessionError, SessionOptions};
use crate::types::{PixelType, Region};

pub(crate) type DicomFile = FileDicomObject<InMemDicomObject<StandardDataDictionary>>;

/// Open and parse a DICOM file
pub fn open_dicom_file(file_path: &Path) -> anyhow::Result<DicomFile> {
    open_file(file_path)
        .with_context(|| format!("Failed to open DICOM file: {}", file_path.display()))
}

/// Plane reader over the pixel data of one DICOM file
#[derive(Debug, Clone)]
pub struct DicomReader {
    path: PathBuf,
    info: DicomImageInfo,
    pixel_type: PixelType,
    pixel_data: Vec<u8>,
    little_endian: bool,
    core_entries: Vec<(String, String)>,
    original_entries: Vec<(String, String)>,
}

impl DicomReader {
    /// Open a DICOM file and extract its pixel data
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Format`] if the file cannot be parsed, carries
    /// no usable image or its pixel data cannot be decoded
    pub fn open(path: &Path) -> session::Result<Self> {
        let obj = open_dicom_file(path)?;
        Ok(Self::from_object(path, &obj)?)
    }

    /// Build a reader from an already parsed DICOM object
    pub fn from_object(path: &Path, obj: &DicomFile) -> anyhow::Result<Self> {
        let info = parser::extract_image_info(obj)?;
        let pixels = pixel_data::extract_pixel_data(obj, &info.transfer_syntax.uid)?;

        let mut reader = Self::from_parts(path, info, pixels.data, pixels.little_endian)?;
        reader.original_entries = parser::original_entries(obj);

        debug!(
            path = %path.display(),
            dimensions = %reader.info.dimensions,
            frames = reader.info.number_of_frames,
            samples_per_pixel = reader.info.samples_per_pixel,
            bit_depth = %reader.info.bit_depth,
            transfer_syntax = %reader.info.transfer_syntax,
            "opened DICOM file"
        );

        Ok(reader)
    }

    fn from_parts(
        path: &Path,
        info: DicomImageInfo,
        pixel_data: Vec<u8>,
        little_endian: bool,
    ) -> anyhow::Result<Self> {
        let pixel_type = info.pixel_type()?;
        validation::validate_pixel_data_len(&info, pixel_data.len())?;

        Ok(Self {
            path: path.to_path_buf(),
            core_entries: parser::core_entries(&info),
            info,
            pixel_type,
            pixel_data,
            little_endian,
            original_entries: Vec::new(),
        })
    }

    #[must_use]
    pub fn info(&self) -> &DicomImageInfo {
        &self.info
    }
}

impl PlaneReader for DicomReader {
    fn current_file(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    fn bits_per_pixel(&self) -> u32 {
        u32::from(self.info.bit_depth.stored)
    }

    fn is_little_endian(&self) -> bool {
        self.little_endian
    }

    fn size_x(&self) -> usize {
        usize::from(self.info.dimensions.cols)
    }

    fn size_y(&self) -> usize {
        usize::from(self.info.dimensions.rows)
    }

    fn image_count(&self) -> usize {
        self.info.plane_count()
    }

    fn open_bytes(&mut self, plane: usize, region: Region, buf: &mut [u8]) -> session::Result<()> {
        let count = self.image_count();
        if plane >= count {
            return Err(SessionError::PlaneOutOfRange { plane, count });
        }

        let (size_x, size_y) = (self.size_x(), self.size_y());
        if !region.fits_within(size_x, size_y) {
            return Err(SessionError::RegionOutOfBounds {
                region,
                size_x,
                size_y,
            });
        }

        let bpp = self.info.bit_depth.bytes_per_sample();
        let expected = region.pixel_count() * bpp;
        if buf.len() != expected {
            return Err(SessionError::BufferSize {
                expected,
                actual: buf.len(),
            });
        }

        let samples = usize::from(self.info.samples_per_pixel);
        let (frame, channel) = (plane / samples, plane % samples);
        let frame_len = self.info.frame_len();
        let frame_data = self
            .pixel_data
            .get(frame * frame_len..(frame + 1) * frame_len)
            .ok_or_else(|| anyhow!("Pixel data ends before frame {frame}"))?;

        trace!(plane, frame, channel, %region, "copying plane region");

        let layout = self.info.sample_layout();
        let pixels_per_frame = self.info.dimensions.pixel_count();
        for (i, dest) in buf.chunks_exact_mut(bpp).enumerate() {
            let row = region.y + i / region.width;
            let col = region.x + i % region.width;
            let offset = sample_offset(
                layout,
                row * size_x + col,
                channel,
                samples,
                pixels_per_frame,
            ) * bpp;
            dest.copy_from_slice(&frame_data[offset..offset + bpp]);
        }

        Ok(())
    }

    fn metadata_entries(&self, include_original: bool) -> Option<Vec<(String, String)>> {
        let mut entries = self.core_entries.clone();
        if include_original {
            entries.extend(self.original_entries.iter().cloned());
        }
        Some(entries)
    }
}

/// Index of one sample within a frame, in samples
#[inline(always)]
fn sample_offset(
    layout: SampleLayout,
    pixel: usize,
    channel: usize,
    samples_per_pixel: usize,
    pixels_per_frame: usize,
) -> usize {
    match layout {
        SampleLayout::Interleaved => pixel * samples_per_pixel + channel,
        SampleLayout::Planar => channel * pixels_per_frame + pixel,
    }
}

impl Session<DicomReader> {
    /// Open a DICOM file and set up a session over it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the requested metadata
    /// store cannot be built
    pub fn open(path: impl AsRef<Path>, options: SessionOptions) -> session::Result<Self> {
        Session::new(DicomReader::open(path.as_ref())?, options)
    }
}
