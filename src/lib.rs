pub mod dicom;
pub mod logger;
pub mod pixels;
pub mod session;
pub mod types;

// Re-export commonly used items
pub use pixels::{decode_raw, normalize, select_representation, PixelArray, PixelError, Representation};
pub use session::{read_pixels, PlaneReader, Pixels, Session, SessionError, SessionOptions};
pub use types::{PixelType, PixelTypeDescriptor, Region};
