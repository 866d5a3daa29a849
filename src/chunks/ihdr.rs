use nom::{
    combinator::map_res,
    number::complete::{be_u32, u8},
    sequence::tuple,
    IResult,
};

use super::{ChunkPayload, ChunkType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IHDRChunk {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: Interlacing,
}
impl IHDRChunk {
    pub fn new(
        width: u32,
        height: u32,
        bit_depth: u8,
        color_type: ColorType,
        interlace_method: Interlacing,
    ) -> Self {
        // Deflate compression and adaptive filtering are the only methods PNG defines.
        Self {
            width,
            height,
            bit_depth,
            color_type,
            compression_method: 0,
            filter_method: 0,
            interlace_method,
        }
    }

    /// Header for 8-bit truecolor-with-alpha, non-interlaced images.
    pub fn rgba8(width: u32, height: u32) -> Self {
        Self::new(
            width,
            height,
            8,
            ColorType::TruecolorWithAlpha,
            Interlacing::None,
        )
    }

    pub fn is_rgba8(&self) -> bool {
        self.bit_depth == 8
            && self.color_type == ColorType::TruecolorWithAlpha
            && self.compression_method == 0
            && self.filter_method == 0
            && self.interlace_method == Interlacing::None
    }

    /// Bytes per scanline including the filter tag, or `None` if that doesn't fit a `usize`.
    pub fn scanline_size(&self) -> Option<usize> {
        let bits = (self.width as usize).checked_mul(self.pixel_width() as usize)?;
        Some(bits / 8 + usize::from(bits % 8 != 0) + 1)
    }

    fn pixel_width(&self) -> u8 {
        self.color_type.channel_count() * self.bit_depth
    }
}
impl<'a> ChunkPayload<'a> for IHDRChunk {
    type Payload = [u8; 13];
    const TYPE: ChunkType = ChunkType::IHDR;

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (rest, (width, height, bit_depth, color_type)) = tuple((
            be_u32,
            be_u32,
            u8,
            map_res(u8, ColorType::try_from),
        ))(chunk_data)?;
        let (rest, (compression_method, filter_method, interlace_method)) =
            tuple((u8, u8, map_res(u8, Interlacing::try_from)))(rest)?;
        Ok((
            rest,
            IHDRChunk {
                width,
                height,
                bit_depth,
                color_type,
                compression_method,
                filter_method,
                interlace_method,
            },
        ))
    }

    fn payload(&self) -> Self::Payload {
        let mut bytes = [0; 13];
        bytes[0..4].copy_from_slice(&self.width.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.height.to_be_bytes());
        bytes[8..].copy_from_slice(&[
            self.bit_depth,
            self.color_type as u8,
            self.compression_method,
            self.filter_method,
            self.interlace_method as u8,
        ]);
        bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Greyscale = 0,
    Truecolor = 2,
    IndexedColor = 3,
    GreyscaleWithAlpha = 4,
    TruecolorWithAlpha = 6,
}
impl TryFrom<u8> for ColorType {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GreyscaleWithAlpha),
            6 => Ok(Self::TruecolorWithAlpha),
            v => Err(v),
        }
    }
}
impl ColorType {
    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Greyscale => 1,
            Self::IndexedColor => 1,
            Self::GreyscaleWithAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorWithAlpha => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interlacing {
    None = 0,
    Adam7 = 1,
}
impl TryFrom<u8> for Interlacing {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Adam7),
            v => Err(v),
        }
    }
}
