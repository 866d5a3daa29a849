//! Reads back the PNG subset the encoder produces, mainly so that generated icons can
//! be verified without a third-party decoder.

use std::marker::PhantomData;

use log::debug;

use crate::{
    chunks::{ihdr::IHDRChunk, iter_chunks, parse_signature, Chunk},
    error::DecodeError,
    image_data::decompress_data,
    pixel::Pixel,
    scanlines::FILTER_NONE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}
impl DecodedImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

pub struct PNGDecoder<'a, State>(&'a [u8], PhantomData<State>);

pub struct Start;
pub struct Header;

impl<'a> PNGDecoder<'a, Start> {
    pub fn new(data: &'a [u8]) -> Result<Self, DecodeError> {
        let (rest, _) = parse_signature(data).map_err(|_| DecodeError::Signature)?;
        Ok(Self(rest, PhantomData))
    }

    pub fn parse_ihdr(self) -> Result<(PNGDecoder<'a, Header>, IHDRChunk), DecodeError> {
        let mut chunks = iter_chunks(self.0);
        match chunks.next() {
            Some(Ok(Chunk::IHDR(ihdr))) => Ok((PNGDecoder(chunks.remaining(), PhantomData), ihdr)),
            Some(Err(e)) => Err(DecodeError::Chunk(e.to_string())),
            _ => Err(DecodeError::MissingChunk("IHDR")),
        }
    }
}

impl<'a> PNGDecoder<'a, Header> {
    /// Concatenates every IDAT payload up to IEND.
    pub fn collect_image_data(self) -> Result<Vec<u8>, DecodeError> {
        let mut data = vec![];
        let mut seen_iend = false;
        for chunk in iter_chunks(self.0) {
            match chunk.map_err(|e| DecodeError::Chunk(e.to_string()))? {
                Chunk::IDAT(idat) => data.extend_from_slice(idat.data),
                Chunk::IEND => seen_iend = true,
                Chunk::IHDR(_) => {
                    return Err(DecodeError::Chunk("IHDR appears more than once".into()))
                }
                Chunk::Unknown(raw) => debug!("Skipping {} chunk", raw.chunk_type.as_str()),
            }
        }
        if data.is_empty() {
            return Err(DecodeError::MissingChunk("IDAT"));
        }
        if !seen_iend {
            return Err(DecodeError::MissingChunk("IEND"));
        }
        Ok(data)
    }
}

/// Decodes an 8-bit RGBA, non-interlaced PNG whose scanlines all use filter type 0.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let (decoder, header) = PNGDecoder::new(bytes)?.parse_ihdr()?;
    if !header.is_rgba8() {
        return Err(DecodeError::Unsupported(format!("{header:?}")));
    }
    let raw = decompress_data(&decoder.collect_image_data()?)?;

    let sizes = header.scanline_size().and_then(|row_length| {
        Some((row_length, row_length.checked_mul(header.height as usize)?))
    });
    let Some((row_length, expected)) = sizes else {
        return Err(DecodeError::Unsupported(format!(
            "{}x{} image is too large",
            header.width, header.height
        )));
    };
    if raw.len() != expected {
        return Err(DecodeError::DataLength {
            expected,
            actual: raw.len(),
        });
    }

    let mut pixels = Vec::with_capacity(expected / 4);
    for (row, scanline) in raw.chunks(row_length).enumerate() {
        let (filter, samples) = scanline.split_at(1);
        if filter[0] != FILTER_NONE {
            return Err(DecodeError::Unsupported(format!(
                "filter type {} on row {row}",
                filter[0]
            )));
        }
        pixels.extend(
            samples
                .chunks_exact(4)
                .map(|rgba| Pixel::new(rgba[0], rgba[1], rgba[2], rgba[3])),
        );
    }

    Ok(DecodedImage {
        width: header.width,
        height: header.height,
        pixels,
    })
}
