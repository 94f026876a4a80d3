use std::mem;

use crate::{
    chunks::ihdr::{ImageHeader, BYTES_PER_PIXEL},
    error::{Error, Result},
    filters::Filter,
    pixel::{Pixel, Raster},
};

/// Splits decompressed image data into `(filter type byte, filtered bytes)`
/// per row. The final row may be short if the data is.
pub(crate) struct NormalScanline<'a> {
    scanline_iter: std::slice::Chunks<'a, u8>,
}
impl<'a> NormalScanline<'a> {
    pub(crate) fn new(image_data: &'a [u8], header: &ImageHeader) -> Self {
        Self {
            scanline_iter: image_data.chunks(header.scanline_size()),
        }
    }
}
impl<'a> Iterator for NormalScanline<'a> {
    type Item = (u8, &'a [u8]);
    fn next(&mut self) -> Option<Self::Item> {
        let (filter_type, filtered) = self.scanline_iter.next()?.split_first()?;
        Some((*filter_type, filtered))
    }
}

/// Turns decompressed, filtered scanlines into a raster.
pub fn reconstruct(image_data: &[u8], header: &ImageHeader) -> Result<Raster> {
    header.ensure_supported()?;
    let width = header.width() as usize;
    let height = header.height() as usize;
    let scanline_size = header.scanline_size();

    // Checked before anything is sized from the declared dimensions.
    if height.checked_mul(scanline_size) != Some(image_data.len()) {
        return Err(length_mismatch(image_data.len(), scanline_size, width, height));
    }
    let mut raster = Raster::with_capacity(width, height);
    if height == 0 {
        return Ok(raster);
    }

    let row_bytes = scanline_size - 1;
    let mut previous = vec![0; row_bytes];
    let mut current = Vec::with_capacity(row_bytes);
    for (row, (filter_type, filtered)) in NormalScanline::new(image_data, header).enumerate() {
        let filter = Filter::try_from(filter_type)?;
        log::trace!("row {row}: {filter:?}");
        unfilter_row(filter, filtered, &previous, &mut current);
        raster.push_row(
            current
                .chunks_exact(BYTES_PER_PIXEL)
                .map(|rgb| Pixel::new(rgb[0], rgb[1], rgb[2]))
                .collect(),
        );
        mem::swap(&mut previous, &mut current);
    }
    log::debug!("reconstructed {width}x{height} raster");
    Ok(raster)
}

/// Names what is wrong with image data whose length isn't
/// `height * scanline_size`: the number of (possibly partial) rows, or, when
/// that matches, the whole pixels in the short final row.
fn length_mismatch(len: usize, scanline_size: usize, width: usize, height: usize) -> Error {
    let rows = len.div_ceil(scanline_size);
    if rows != height {
        return Error::RowCount {
            expected: height,
            actual: rows,
        };
    }
    let last_row = len - (height - 1) * scanline_size;
    Error::PixelCount {
        row: height - 1,
        expected: width,
        actual: (last_row - 1) / BYTES_PER_PIXEL,
    }
}

/// Reconstructs one row into `current`, reading neighbours from the bytes
/// already reconstructed and from `previous`.
fn unfilter_row(filter: Filter, filtered: &[u8], previous: &[u8], current: &mut Vec<u8>) {
    current.clear();
    for (i, &x) in filtered.iter().enumerate() {
        let (a, c) = if i >= BYTES_PER_PIXEL {
            (current[i - BYTES_PER_PIXEL], previous[i - BYTES_PER_PIXEL])
        } else {
            (0, 0)
        };
        let b = previous[i];
        current.push(filter.reconstruct(x, a, b, c));
    }
}
