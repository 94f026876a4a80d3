use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib};

use crate::error::{Error, Result};

/// The zlib/DEFLATE boundary. IDAT payloads go through `inflate` once, after
/// every IDAT chunk has been concatenated; re-encoding goes through `deflate`.
pub trait Codec {
    fn inflate(&self, compressed: &[u8]) -> Result<Vec<u8>>;
    fn deflate(&self, raw: &[u8], level: u8) -> Vec<u8>;
}

/// zlib-wrapped DEFLATE backed by `miniz_oxide`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Zlib;

impl Codec for Zlib {
    fn inflate(&self, compressed: &[u8]) -> Result<Vec<u8>> {
        decompress_to_vec_zlib(compressed)
            .map_err(|e| Error::Decompression(format!("{:?}", e.status)))
    }

    fn deflate(&self, raw: &[u8], level: u8) -> Vec<u8> {
        compress_to_vec_zlib(raw, level)
    }
}
