/// Compression level used when re-encoding. Favours speed over size.
pub const FAST_COMPRESSION_LEVEL: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Check each chunk's CRC-32 trailer against its type and payload.
    pub verify_crc: bool,
}
impl Default for DecodeOptions {
    fn default() -> Self {
        Self { verify_crc: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// zlib level handed to the codec, 0 (store) to 10 (slowest).
    pub compression_level: u8,
}
impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            compression_level: FAST_COMPRESSION_LEVEL,
        }
    }
}
