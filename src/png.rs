use std::{fs, path::Path};

use crate::{
    chunks::ihdr::ImageHeader,
    compression::{Codec, Zlib},
    decoder::PNGDecoder,
    encoder,
    error::{Error, Result},
    options::{DecodeOptions, EncodeOptions},
    pixel::{Channel, Raster},
    scanlines,
};

/// A decoded 8-bit RGB image: its IHDR metadata and pixel rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PNG {
    header: ImageHeader,
    raster: Raster,
}

impl PNG {
    pub fn new(header: ImageHeader, raster: Raster) -> Self {
        Self { header, raster }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, DecodeOptions::default(), &Zlib)
    }

    pub fn decode_with<C: Codec>(bytes: &[u8], options: DecodeOptions, codec: &C) -> Result<Self> {
        let decoder = PNGDecoder::new(bytes, options)?;
        let (decoder, header) = decoder.parse_ihdr()?;
        let compressed = decoder.collect_idat()?;
        let image_data = codec.inflate(&compressed)?;
        let raster = scanlines::reconstruct(&image_data, &header)?;
        Ok(Self { header, raster })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;
        log::info!("loaded {} ({} bytes)", path.display(), bytes.len());
        Self::decode(&bytes)
    }

    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn raster_mut(&mut self) -> &mut Raster {
        &mut self.raster
    }

    pub fn into_parts(self) -> (ImageHeader, Raster) {
        (self.header, self.raster)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        self.encode_with(None, &EncodeOptions::default())
    }

    pub fn encode_channel(&self, channel: Channel) -> Result<Vec<u8>> {
        self.encode_with(Some(channel), &EncodeOptions::default())
    }

    pub fn encode_with(&self, channel: Option<Channel>, options: &EncodeOptions) -> Result<Vec<u8>> {
        encoder::encode(&self.raster, &self.header, channel, options, &Zlib)
    }

    pub fn save_rgb(&self, path: impl AsRef<Path>, channel: Channel) -> Result<()> {
        encoder::save_rgb(&self.raster, &self.header, path, channel)
    }
}
