//! Reader over planes already held in memory

use std::path::{Path, PathBuf};

use super::error::{Result, SessionError};
use super::PlaneReader;
use crate::types::{PixelType, Region};

/// Single-channel planes of one pixel type, all of the same size
#[derive(Debug, Clone)]
pub struct MemoryReader {
    pixel_type: PixelType,
    size_x: usize,
    size_y: usize,
    little_endian: bool,
    bits_per_pixel: u32,
    planes: Vec<Vec<u8>>,
    file: Option<PathBuf>,
    metadata: Option<Vec<(String, String)>>,
}

impl MemoryReader {
    #[must_use]
    pub fn new(pixel_type: PixelType, size_x: usize, size_y: usize, little_endian: bool) -> Self {
        Self {
            pixel_type,
            size_x,
            size_y,
            little_endian,
            bits_per_pixel: (pixel_type.bytes_per_pixel() * 8) as u32,
            planes: Vec::new(),
            file: None,
            metadata: None,
        }
    }

    /// Append a plane
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::BufferSize`] if the plane does not hold exactly
    /// `size_x * size_y` samples
    pub fn push_plane(&mut self, bytes: Vec<u8>) -> Result<()> {
        let expected = self.plane_len();
        if bytes.len() != expected {
            return Err(SessionError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        self.planes.push(bytes);
        Ok(())
    }

    #[must_use]
    pub fn with_bits_per_pixel(mut self, bits: u32) -> Self {
        self.bits_per_pixel = bits;
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, entries: Vec<(String, String)>) -> Self {
        self.metadata = Some(entries);
        self
    }

    #[inline]
    fn plane_len(&self) -> usize {
        self.size_x * self.size_y * self.pixel_type.bytes_per_pixel()
    }
}

impl PlaneReader for MemoryReader {
    fn current_file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    fn is_little_endian(&self) -> bool {
        self.little_endian
    }

    fn size_x(&self) -> usize {
        self.size_x
    }

    fn size_y(&self) -> usize {
        self.size_y
    }

    fn image_count(&self) -> usize {
        self.planes.len()
    }

    fn open_bytes(&mut self, plane: usize, region: Region, buf: &mut [u8]) -> Result<()> {
        let bpp = self.pixel_type.bytes_per_pixel();
        let count = self.planes.len();
        let source = self
            .planes
            .get(plane)
            .ok_or(SessionError::PlaneOutOfRange { plane, count })?;

        if !region.fits_within(self.size_x, self.size_y) {
            return Err(SessionError::RegionOutOfBounds {
                region,
                size_x: self.size_x,
                size_y: self.size_y,
            });
        }

        let expected = region.pixel_count() * bpp;
        if buf.len() != expected {
            return Err(SessionError::BufferSize {
                expected,
                actual: buf.len(),
            });
        }

        let row_len = region.width * bpp;
        if row_len == 0 {
            return Ok(());
        }
        for (row, dest) in buf.chunks_exact_mut(row_len).enumerate() {
            let start = ((region.y + row) * self.size_x + region.x) * bpp;
            dest.copy_from_slice(&source[start..start + row_len]);
        }

        Ok(())
    }

    fn metadata_entries(&self, _include_original: bool) -> Option<Vec<(String, String)>> {
        self.metadata.clone()
    }
}
