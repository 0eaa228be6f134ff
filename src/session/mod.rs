//! Reading sessions
//!
//! A [`Session`] owns one [`PlaneReader`] together with the options it was
//! set up with and the metadata collected at that time. Callers hold the
//! session explicitly; there is no process-wide reader.

mod error;
mod memory;
mod metadata;
mod options;

pub use error::{Result, SessionError};
pub use memory::MemoryReader;
pub use metadata::MetadataStore;
pub use options::{SessionOptions, SessionOptionsBuilder, DIMENSION_ORDER};

use std::path::Path;

use tracing::debug;

use crate::pixels::{self, PixelArray};
use crate::types::{PixelType, PixelTypeDescriptor, Region};

/// Source of plane buffers
///
/// Planes are numbered in [`DIMENSION_ORDER`]. Readers that carry several
/// samples per pixel split them into separate planes.
pub trait PlaneReader {
    fn current_file(&self) -> Option<&Path>;

    fn pixel_type(&self) -> PixelType;

    /// Number of meaningful bits per sample
    fn bits_per_pixel(&self) -> u32;

    fn is_little_endian(&self) -> bool;

    fn size_x(&self) -> usize;

    fn size_y(&self) -> usize;

    /// Number of planes
    fn image_count(&self) -> usize;

    /// Copy one region of a plane into `buf`
    fn open_bytes(&mut self, plane: usize, region: Region, buf: &mut [u8]) -> Result<()>;

    /// Metadata entries, `None` if the reader has no metadata service
    fn metadata_entries(&self, include_original: bool) -> Option<Vec<(String, String)>> {
        let _ = include_original;
        None
    }

    /// Descriptor of the planes this reader produces
    fn descriptor(&self) -> PixelTypeDescriptor {
        PixelTypeDescriptor::from_pixel_type(self.pixel_type(), self.is_little_endian())
            .with_true_bit_depth(self.bits_per_pixel())
    }
}

/// Samples returned by [`read_pixels`]
#[derive(Debug, Clone, PartialEq)]
pub enum Pixels {
    Raw(PixelArray),
    Normalized(Vec<f64>),
}

impl Pixels {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Raw(array) => array.len(),
            Self::Normalized(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read one region of a plane and decode or normalize it
///
/// # Errors
///
/// Returns an error if the plane or region is out of range, the reader fails
/// or the buffer cannot be decoded
pub fn read_pixels<R: PlaneReader + ?Sized>(
    reader: &mut R,
    plane: usize,
    region: Region,
    normalize: bool,
) -> Result<Pixels> {
    let count = reader.image_count();
    if plane >= count {
        return Err(SessionError::PlaneOutOfRange { plane, count });
    }

    let (size_x, size_y) = (reader.size_x(), reader.size_y());
    if !region.fits_within(size_x, size_y) {
        return Err(SessionError::RegionOutOfBounds {
            region,
            size_x,
            size_y,
        });
    }

    let descriptor = reader.descriptor();
    let size = region.pixel_count() * descriptor.bytes_per_pixel;
    let mut buf = vec![0u8; size];
    reader.open_bytes(plane, region, &mut buf)?;

    debug!(plane, %region, %descriptor, normalize, bytes = size, "read plane region");

    Ok(if normalize {
        Pixels::Normalized(pixels::normalize(&buf, &descriptor)?)
    } else {
        Pixels::Raw(pixels::decode_raw(&buf, &descriptor)?)
    })
}

/// An open reader plus the options and metadata it was set up with
#[derive(Debug)]
pub struct Session<R> {
    reader: R,
    options: SessionOptions,
    metadata: MetadataStore,
}

impl<R: PlaneReader> Session<R> {
    /// Set up a session over an opened reader
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingMetadataService`] if a metadata store was
    /// requested and the reader cannot provide one
    pub fn new(reader: R, options: SessionOptions) -> Result<Self> {
        let metadata = if options.metadata_store {
            let entries = reader
                .metadata_entries(options.original_metadata)
                .ok_or_else(|| {
                    SessionError::MissingMetadataService(
                        "reader does not provide a metadata store".to_string(),
                    )
                })?;
            MetadataStore::from_entries(entries, options.filter_metadata)
        } else {
            MetadataStore::Dummy
        };

        debug!(
            file = ?reader.current_file(),
            planes = reader.image_count(),
            pixel_type = %reader.pixel_type(),
            dimension_order = DIMENSION_ORDER,
            metadata_entries = metadata.len(),
            "session ready"
        );

        Ok(Self {
            reader,
            options,
            metadata,
        })
    }

    /// See [`read_pixels`]
    pub fn read_pixels(&mut self, plane: usize, region: Region, normalize: bool) -> Result<Pixels> {
        read_pixels(&mut self.reader, plane, region, normalize)
    }

    #[must_use]
    pub fn current_file(&self) -> Option<&Path> {
        self.reader.current_file()
    }

    #[must_use]
    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    #[must_use]
    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn into_reader(self) -> R {
        self.reader
    }
}
