use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("pixel ({x}, {y}) has {channel} value {value}, expected 0..=255")]
    InvalidPixelValue {
        x: u32,
        y: u32,
        channel: &'static str,
        value: i64,
    },
    #[error("chunk payload of {0} bytes doesn't fit a u32 length")]
    ChunkTooLarge(usize),
    #[error("failed to compress image data: {0}")]
    CompressionFailure(String),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("input doesn't start with expected signature")]
    Signature,
    #[error("malformed chunk stream: {0}")]
    Chunk(String),
    #[error("missing {0} chunk")]
    MissingChunk(&'static str),
    #[error("unsupported image: {0}")]
    Unsupported(String),
    #[error("failed to decompress image data: {0}")]
    Decompression(String),
    #[error("image data is {actual} bytes, expected {expected}")]
    DataLength { expected: usize, actual: usize },
}
