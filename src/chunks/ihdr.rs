use nom::{
    combinator::all_consuming,
    number::complete::{be_u32, u8},
    sequence::tuple,
    IResult,
};

use super::{frame_chunk, ParseableChunk};
use crate::error::{Error, Result};

/// Bytes per pixel in the only supported profile (8-bit truecolor).
pub(crate) const BYTES_PER_PIXEL: usize = 3;

/// Image metadata carried by the IHDR chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: ColorType,
    compression_method: u8,
    filter_method: u8,
    interlace_method: Interlacing,
}
impl ImageHeader {
    /// Header for a non-interlaced 8-bit truecolor image.
    pub fn rgb8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::Truecolor,
            compression_method: 0,
            filter_method: 0,
            interlace_method: Interlacing::None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    pub fn compression_method(&self) -> u8 {
        self.compression_method
    }

    pub fn filter_method(&self) -> u8 {
        self.filter_method
    }

    pub fn interlace_method(&self) -> Interlacing {
        self.interlace_method
    }

    /// Filtered bytes per row: one filter-type byte plus the pixel bytes.
    pub(crate) fn scanline_size(&self) -> usize {
        (self.width as usize)
            .saturating_mul(BYTES_PER_PIXEL)
            .saturating_add(1)
    }

    /// Rejects anything other than non-interlaced 8-bit truecolor.
    pub(crate) fn ensure_supported(&self) -> Result<()> {
        if self.bit_depth != 8 {
            return Err(Error::Unsupported(format!(
                "bit depth {} (only 8 is supported)",
                self.bit_depth
            )));
        }
        if self.color_type != ColorType::Truecolor {
            return Err(Error::Unsupported(format!(
                "color type {:?} (only truecolor is supported)",
                self.color_type
            )));
        }
        if self.interlace_method != Interlacing::None {
            return Err(Error::Unsupported(format!(
                "interlace method {:?}",
                self.interlace_method
            )));
        }
        Ok(())
    }
}
impl<'a> ParseableChunk<'a> for ImageHeader {
    type Output = Vec<u8>;

    const HEADER: &'static [u8; 4] = b"IHDR";

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (
            rest,
            (width, height, bit_depth, color_type, compression_method, filter_method, interlace_method),
        ) = all_consuming(tuple((be_u32, be_u32, u8, u8, u8, u8, u8)))(chunk_data)?;
        Ok((
            rest,
            ImageHeader {
                width,
                height,
                bit_depth,
                color_type: color_type.into(),
                compression_method,
                filter_method,
                interlace_method: interlace_method.into(),
            },
        ))
    }

    fn to_bytes(&self) -> Self::Output {
        let mut data = Vec::with_capacity(13);
        data.extend(self.width.to_be_bytes());
        data.extend(self.height.to_be_bytes());
        data.extend([
            self.bit_depth,
            self.color_type.into(),
            self.compression_method,
            self.filter_method,
            self.interlace_method.into(),
        ]);
        frame_chunk(Self::HEADER, &data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Greyscale,
    Truecolor,
    IndexedColor,
    GreyscaleWithAlpha,
    TruecolorWithAlpha,
    Other(u8),
}
impl From<u8> for ColorType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Greyscale,
            2 => Self::Truecolor,
            3 => Self::IndexedColor,
            4 => Self::GreyscaleWithAlpha,
            6 => Self::TruecolorWithAlpha,
            other => Self::Other(other),
        }
    }
}
impl From<ColorType> for u8 {
    fn from(value: ColorType) -> Self {
        match value {
            ColorType::Greyscale => 0,
            ColorType::Truecolor => 2,
            ColorType::IndexedColor => 3,
            ColorType::GreyscaleWithAlpha => 4,
            ColorType::TruecolorWithAlpha => 6,
            ColorType::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interlacing {
    None,
    Adam7,
    Other(u8),
}
impl From<u8> for Interlacing {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Adam7,
            other => Self::Other(other),
        }
    }
}
impl From<Interlacing> for u8 {
    fn from(value: Interlacing) -> Self {
        match value {
            Interlacing::None => 0,
            Interlacing::Adam7 => 1,
            Interlacing::Other(other) => other,
        }
    }
}
