use std::marker::PhantomData;

use nom::{bytes::complete::tag, IResult};

use crate::{
    chunks::{ihdr::ImageHeader, iter_chunks, read_raw_chunk, Chunk, ParseableChunk},
    error::{Error, Result},
    options::DecodeOptions,
};

pub(crate) const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

/// Walks a PNG byte stream in order: signature, then IHDR, then the rest of
/// the chunks. `State` tracks how far the walk has got.
pub struct PNGDecoder<'a, State> {
    data: &'a [u8],
    offset: usize,
    options: DecodeOptions,
    state: PhantomData<State>,
}

pub struct Start;
pub struct Chunks;

impl<'a> PNGDecoder<'a, Start> {
    pub fn new(data: &'a [u8], options: DecodeOptions) -> Result<Self> {
        let (rest, _) = parse_signature(data).map_err(|_| Error::Signature)?;
        Ok(Self {
            data: rest,
            offset: SIGNATURE.len(),
            options,
            state: PhantomData,
        })
    }

    /// The chunk straight after the signature must be IHDR.
    pub fn parse_ihdr(self) -> Result<(PNGDecoder<'a, Chunks>, ImageHeader)> {
        let (rest, raw) = read_raw_chunk(self.data, self.offset, self.options.verify_crc)?;
        if raw.chunk_type != ImageHeader::HEADER {
            return Err(Error::MissingHeader(raw.type_name()));
        }
        let (_, header) =
            ImageHeader::from_bytes(raw.data).map_err(|_| raw.invalid_payload(self.offset))?;
        log::debug!("{header:?}");
        Ok((
            PNGDecoder {
                offset: self.offset + self.data.len() - rest.len(),
                data: rest,
                options: self.options,
                state: PhantomData,
            },
            header,
        ))
    }
}

impl<'a> PNGDecoder<'a, Chunks> {
    /// Concatenates every IDAT payload up to IEND. Other chunks are skipped.
    pub fn collect_idat(self) -> Result<Vec<u8>> {
        let mut compressed = vec![];
        let mut saw_end = false;
        for chunk in iter_chunks(self.data, self.offset, self.options.verify_crc) {
            match chunk? {
                Chunk::IDAT(idat) => compressed.extend_from_slice(idat.data),
                Chunk::IEND => saw_end = true,
                Chunk::Unknown(_) => (),
            }
        }
        if !saw_end {
            log::warn!("chunk stream ended without IEND");
        }
        log::debug!("collected {} bytes of image data", compressed.len());
        Ok(compressed)
    }
}

fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(SIGNATURE.as_slice())(input)
}

/// Checks the signature and parses the IHDR chunk.
pub fn read_header(bytes: &[u8]) -> Result<ImageHeader> {
    let (_, header) = PNGDecoder::new(bytes, DecodeOptions::default())?.parse_ihdr()?;
    Ok(header)
}

/// Checks the signature and IHDR placement, then returns the concatenated
/// IDAT payload, still compressed.
pub fn collect_image_data(bytes: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
    let (decoder, _) = PNGDecoder::new(bytes, *options)?.parse_ihdr()?;
    decoder.collect_idat()
}
