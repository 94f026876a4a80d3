//! Decodes 8-bit truecolor PNGs into a pixel raster and writes rasters back
//! out as minimal PNGs (one unfiltered IDAT), optionally keeping a single
//! colour channel.

mod chunks;
mod compression;
mod decoder;
mod encoder;
mod error;
mod filters;
mod options;
mod pixel;
mod png;
mod scanlines;

pub use chunks::ihdr::{ColorType, ImageHeader, Interlacing};
pub use compression::{Codec, Zlib};
pub use decoder::{collect_image_data, read_header, Chunks, PNGDecoder, Start};
pub use encoder::{encode, save_rgb};
pub use error::{Error, ErrorKind, Result};
pub use options::{DecodeOptions, EncodeOptions, FAST_COMPRESSION_LEVEL};
pub use pixel::{Channel, Pixel, Raster};
pub use png::PNG;
pub use scanlines::reconstruct;
