use super::{ChunkPayload, ChunkType};
use nom::IResult;

#[derive(Debug)]
pub struct IDATChunk<'a> {
    pub data: &'a [u8],
}
impl<'a> ChunkPayload<'a> for IDATChunk<'a> {
    type Payload = &'a [u8];
    const TYPE: ChunkType = ChunkType::IDAT;

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        Ok((&chunk_data[0..0], IDATChunk { data: chunk_data }))
    }

    fn payload(&self) -> Self::Payload {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_compressed_stream_verbatim() {
        let data = [0x78, 0x9c, 0x63, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01];
        let framed = IDATChunk { data: &data }.to_bytes().unwrap();
        assert_eq!(&framed[0..4], 9u32.to_be_bytes().as_slice());
        assert_eq!(&framed[4..8], b"IDAT");
        assert_eq!(&framed[8..17], data.as_slice());
        assert_eq!(framed.len(), 9 + 12);
    }
}
