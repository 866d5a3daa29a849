use nom::{
    bytes::complete::{tag, take},
    combinator::map,
    multi::length_data,
    number::complete::be_u32,
    sequence::{terminated, tuple},
    IResult,
};

use crate::{crc::calculate_crc, error::EncodeError};

pub mod idat;
pub mod iend;
pub mod ihdr;

pub const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkType(pub [u8; 4]);
impl ChunkType {
    pub const IHDR: Self = ChunkType(*b"IHDR");
    pub const IDAT: Self = ChunkType(*b"IDAT");
    pub const IEND: Self = ChunkType(*b"IEND");

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

/// Frames `data` as `{length}{type}{data}{crc}`, with the CRC taken over type and data.
pub fn frame_chunk(chunk_type: ChunkType, data: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let len = u32::try_from(data.len()).map_err(|_| EncodeError::ChunkTooLarge(data.len()))?;
    let mut bytes = Vec::with_capacity(data.len() + 12);
    bytes.extend(len.to_be_bytes());
    bytes.extend(chunk_type.0);
    bytes.extend(data);
    let crc = calculate_crc(bytes[4..].iter().copied()).to_be_bytes();
    bytes.extend(crc);
    Ok(bytes)
}

pub(crate) trait ChunkPayload<'a>: Sized {
    type Payload: AsRef<[u8]>;
    const TYPE: ChunkType;

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
    fn payload(&self) -> Self::Payload;

    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        frame_chunk(Self::TYPE, self.payload().as_ref())
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}
impl Chunk<'_> {
    pub fn chunk_type(&self) -> ChunkType {
        match self {
            Chunk::IHDR(_) => ChunkType::IHDR,
            Chunk::IDAT(_) => ChunkType::IDAT,
            Chunk::IEND => ChunkType::IEND,
            Chunk::Unknown(raw) => raw.chunk_type,
        }
    }
}

#[derive(Debug)]
pub struct RawChunk<'a> {
    pub chunk_type: ChunkType,
    pub data: &'a [u8],
}

pub fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(SIGNATURE.as_slice())(input)
}

/// Walks the chunks following the signature, checking each CRC. Stops after `IEND`
/// or the first malformed chunk.
pub fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}
impl<'a> ChunkIter<'a> {
    /// Bytes not yet consumed by the iterator.
    pub fn remaining(&self) -> &'a [u8] {
        self.source
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = anyhow::Result<Chunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if matches!(chunk, Chunk::IEND) {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.to_owned().into()))
            }
        }
    }
}

fn parse_chunk(input: &[u8]) -> IResult<&[u8], Chunk<'_>> {
    let (rest, (chunk_type, chunk_data)) = valid_chunk(input)?;
    let chunk = match chunk_type {
        ChunkType::IHDR => Chunk::IHDR(ihdr::IHDRChunk::from_bytes(chunk_data)?.1),
        ChunkType::IDAT => Chunk::IDAT(idat::IDATChunk::from_bytes(chunk_data)?.1),
        ChunkType::IEND => Chunk::IEND,
        _ => Chunk::Unknown(RawChunk {
            chunk_type,
            data: chunk_data,
        }),
    };
    Ok((rest, chunk))
}

fn valid_chunk(input: &[u8]) -> IResult<&[u8], (ChunkType, &[u8])> {
    let (type_length, crc_length) = (4u32, 4u32);
    let (input, chunk_data) = length_data(map(be_u32, |v: u32| {
        v.saturating_add(type_length + crc_length)
    }))(input)?;
    let body_length = chunk_data.len() - crc_length as usize;
    let crc = calculate_crc(chunk_data[..body_length].iter().copied()).to_be_bytes();
    let (_, data) = tuple((
        map(take(type_length), |v: &[u8]| {
            ChunkType([v[0], v[1], v[2], v[3]])
        }),
        terminated(take(body_length - type_length as usize), tag(crc.as_slice())),
    ))(chunk_data)?;
    Ok((input, data))
}
