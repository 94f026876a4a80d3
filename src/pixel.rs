use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}
impl Pixel {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}
impl From<[u8; 3]> for Pixel {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self { red, green, blue }
    }
}

/// One colour component of an RGB pixel.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Channel {
    Red,
    Green,
    Blue,
}
impl Channel {
    /// Keeps this channel's value and zeroes the other two.
    pub fn isolate(self, pixel: Pixel) -> Pixel {
        match self {
            Channel::Red => Pixel::new(pixel.red, 0, 0),
            Channel::Green => Pixel::new(0, pixel.green, 0),
            Channel::Blue => Pixel::new(0, 0, pixel.blue),
        }
    }
}
impl TryFrom<u8> for Channel {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Red),
            2 => Ok(Self::Green),
            3 => Ok(Self::Blue),
            i => Err(Error::InvalidChannel(i.to_string())),
        }
    }
}
impl FromStr for Channel {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "red" | "r" | "1" => Ok(Self::Red),
            "green" | "g" | "2" => Ok(Self::Green),
            "blue" | "b" | "3" => Ok(Self::Blue),
            _ => Err(Error::InvalidChannel(s.to_owned())),
        }
    }
}

/// Rows of RGB pixels, every row `width` pixels long.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raster {
    width: usize,
    rows: Vec<Vec<Pixel>>,
}
impl Raster {
    /// An all-black raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Pixel::default(); width]; height],
        }
    }

    /// Builds a raster from rows, which must all be the same length.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::PixelCount {
                row,
                expected: width,
                actual: bad.len(),
            });
        }
        Ok(Self { width, rows })
    }

    pub(crate) fn with_capacity(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: Vec::with_capacity(height),
        }
    }

    pub(crate) fn push_row(&mut self, row: Vec<Pixel>) {
        debug_assert_eq!(row.len(), self.width);
        self.rows.push(row);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Pixel>] {
        &self.rows
    }

    /// Rows can be edited in place but not resized.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Pixel]> {
        self.rows.iter_mut().map(Vec::as_mut_slice)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Pixel> {
        self.rows.get(y)?.get(x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Pixel> {
        self.rows.get_mut(y)?.get_mut(x)
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        self.rows.iter().flatten()
    }

    pub fn isolate(&mut self, channel: Channel) {
        for pixel in self.rows.iter_mut().flatten() {
            *pixel = channel.isolate(*pixel);
        }
    }
}
