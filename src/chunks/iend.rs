use super::{ChunkPayload, ChunkType};

pub struct IENDChunk;
impl<'a> ChunkPayload<'a> for IENDChunk {
    type Payload = [u8; 0];
    const TYPE: ChunkType = ChunkType::IEND;

    fn from_bytes(chunk_data: &'a [u8]) -> nom::IResult<&'a [u8], Self> {
        Ok((chunk_data, Self))
    }

    fn payload(&self) -> Self::Payload {
        []
    }
}
