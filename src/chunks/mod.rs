use nom::{
    bytes::complete::take,
    combinator::map_res,
    multi::length_data,
    number::complete::be_u32,
    sequence::tuple,
    IResult,
};

use crate::error::{Error, Result};

pub(crate) mod idat;
pub(crate) mod iend;
pub(crate) mod ihdr;

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug)]
pub(crate) enum Chunk<'a> {
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}

pub(crate) fn iter_chunks(source: &[u8], offset: usize, verify_crc: bool) -> ChunkIter<'_> {
    ChunkIter {
        source,
        offset,
        verify_crc,
        finished: false,
    }
}

/// Walks the chunk stream in file order, stopping after IEND or when the
/// buffer runs out. `offset` is only used to report where a bad chunk sits.
pub(crate) struct ChunkIter<'a> {
    source: &'a [u8],
    offset: usize,
    verify_crc: bool,
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<Chunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.source.is_empty() {
            return None;
        }
        match read_chunk(self.source, self.offset, self.verify_crc) {
            Ok((rest, chunk)) => {
                self.offset += self.source.len() - rest.len();
                self.source = rest;
                if matches!(chunk, Chunk::IEND) {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

pub(crate) fn read_chunk(
    input: &[u8],
    offset: usize,
    verify_crc: bool,
) -> Result<(&[u8], Chunk<'_>)> {
    let (rest, raw) = read_raw_chunk(input, offset, verify_crc)?;
    Ok((rest, parse_chunk(raw, offset)?))
}

/// Frames one chunk without looking at its payload.
pub(crate) fn read_raw_chunk(
    input: &[u8],
    offset: usize,
    verify_crc: bool,
) -> Result<(&[u8], RawChunk<'_>)> {
    let (rest, raw) = raw_chunk(input).map_err(|_| Error::Structure {
        offset,
        reason: "chunk runs past the end of the buffer".to_owned(),
    })?;
    log::debug!(
        "{} chunk at byte {offset}, {} bytes",
        raw.type_name(),
        raw.data.len()
    );
    if verify_crc {
        raw.verify_crc()?;
    }
    Ok((rest, raw))
}

// Only the leading IHDR is interpreted, by the decoder; any later one is
// skipped like other non-image chunks.
fn parse_chunk(raw: RawChunk<'_>, offset: usize) -> Result<Chunk<'_>> {
    match raw.chunk_type {
        idat::IDATChunk::HEADER => Ok(Chunk::IDAT(
            idat::IDATChunk::from_bytes(raw.data)
                .map_err(|_| raw.invalid_payload(offset))?
                .1,
        )),
        iend::IENDChunk::HEADER => {
            iend::IENDChunk::from_bytes(raw.data).map_err(|_| raw.invalid_payload(offset))?;
            Ok(Chunk::IEND)
        }
        _ => Ok(Chunk::Unknown(raw)),
    }
}

#[derive(Debug)]
pub(crate) struct RawChunk<'a> {
    pub(crate) chunk_type: &'a [u8; 4],
    pub(crate) data: &'a [u8],
    crc: u32,
}
impl RawChunk<'_> {
    pub(crate) fn type_name(&self) -> String {
        String::from_utf8_lossy(self.chunk_type).into_owned()
    }

    pub(crate) fn invalid_payload(&self, offset: usize) -> Error {
        Error::Structure {
            offset,
            reason: format!("invalid {} payload", self.type_name()),
        }
    }

    fn verify_crc(&self) -> Result<()> {
        let computed = chunk_crc(self.chunk_type, self.data);
        if computed != self.crc {
            return Err(Error::Crc {
                chunk_type: self.type_name(),
                stored: self.crc,
                computed,
            });
        }
        Ok(())
    }
}

/// length(4) + type(4) + payload(length) + crc(4)
fn raw_chunk(input: &[u8]) -> IResult<&[u8], RawChunk<'_>> {
    let (rest, (body, crc)) =
        tuple((length_data(map_res(be_u32, checked_body_len)), be_u32))(input)?;
    let (data, chunk_type) = map_res(take(4usize), <&[u8; 4]>::try_from)(body)?;
    Ok((
        rest,
        RawChunk {
            chunk_type,
            data,
            crc,
        },
    ))
}

// The declared length covers the payload only; the type tag is read with it.
fn checked_body_len(length: u32) -> std::result::Result<u32, ()> {
    length.checked_add(4).ok_or(())
}

pub(crate) fn chunk_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    hasher.finalize()
}

/// Frames a payload as `length + type + payload + crc32(type + payload)`.
pub(crate) fn frame_chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() + 12);
    bytes.extend((data.len() as u32).to_be_bytes());
    bytes.extend(chunk_type);
    bytes.extend(data);
    bytes.extend(chunk_crc(chunk_type, data).to_be_bytes());
    bytes
}

pub(crate) trait ParseableChunk<'a>: Sized {
    type Output: AsRef<[u8]>;
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
    fn to_bytes(&self) -> Self::Output;
}
