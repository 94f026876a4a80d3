use std::{fs, path::Path};

use crate::{
    chunks::{
        idat::IDATChunk,
        iend::IENDChunk,
        ihdr::{ImageHeader, BYTES_PER_PIXEL},
        ParseableChunk,
    },
    compression::{Codec, Zlib},
    decoder::SIGNATURE,
    error::{Error, Result},
    options::EncodeOptions,
    pixel::{Channel, Raster},
};

/// Serialises `raster` as signature, IHDR, a single IDAT and IEND.
///
/// Every scanline is written with filter type 0. When `channel` is given the
/// other two components of every pixel are written as zero. The five
/// non-dimension IHDR bytes are copied from `header` unchanged.
pub fn encode<C: Codec>(
    raster: &Raster,
    header: &ImageHeader,
    channel: Option<Channel>,
    options: &EncodeOptions,
    codec: &C,
) -> Result<Vec<u8>> {
    header.ensure_supported()?;
    let width = header.width() as usize;
    let height = header.height() as usize;
    if raster.height() != height {
        return Err(Error::RowCount {
            expected: height,
            actual: raster.height(),
        });
    }

    if let Some((y, row)) = raster
        .rows()
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != width)
    {
        return Err(Error::PixelCount {
            row: y,
            expected: width,
            actual: row.len(),
        });
    }

    // The raster now agrees with the header, so this is bounded by its size.
    let mut filtered = Vec::with_capacity(height * header.scanline_size());
    for row in raster.rows() {
        filtered.push(0);
        for &pixel in row {
            let pixel = channel.map_or(pixel, |channel| channel.isolate(pixel));
            filtered.extend_from_slice(&pixel.to_bytes());
        }
    }
    debug_assert_eq!(filtered.len(), height * (width * BYTES_PER_PIXEL + 1));

    let compressed = codec.deflate(&filtered, options.compression_level);
    log::debug!(
        "compressed {} bytes of scanlines to {} at level {}",
        filtered.len(),
        compressed.len(),
        options.compression_level
    );

    let ihdr = header.to_bytes();
    let idat = IDATChunk { data: &compressed }.to_bytes();
    let iend = IENDChunk.to_bytes();
    let mut bytes = Vec::with_capacity(SIGNATURE.len() + ihdr.len() + idat.len() + iend.len());
    bytes.extend_from_slice(SIGNATURE);
    bytes.extend(ihdr);
    bytes.extend(idat);
    bytes.extend(iend);
    Ok(bytes)
}

/// Writes a PNG keeping only `channel`, with the other two zeroed.
pub fn save_rgb(
    raster: &Raster,
    header: &ImageHeader,
    path: impl AsRef<Path>,
    channel: Channel,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(
        raster,
        header,
        Some(channel),
        &EncodeOptions::default(),
        &Zlib,
    )?;
    fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_owned(),
        source,
    })?;
    log::info!("wrote {channel:?} channel to {}", path.display());
    Ok(())
}
