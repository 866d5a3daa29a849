use miniz_oxide::{
    deflate::core::{compress, create_comp_flags_from_zip_params, CompressorOxide, TDEFLFlush, TDEFLStatus},
    inflate::decompress_to_vec_zlib,
};

use crate::error::{DecodeError, EncodeError};

/// miniz "best compression", which is what the encoder uses unless told otherwise.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 9;

// A positive window size asks miniz for a zlib header and Adler-32 trailer.
const ZLIB_WINDOW_BITS: i32 = 15;
const DEFAULT_STRATEGY: i32 = 0;

/// Deflates `data` into a zlib stream.
pub(crate) fn compress_data(data: &[u8], level: u8) -> Result<Vec<u8>, EncodeError> {
    let flags = create_comp_flags_from_zip_params(level.into(), ZLIB_WINDOW_BITS, DEFAULT_STRATEGY);
    let mut compressor = CompressorOxide::new(flags);
    let mut output = vec![0; usize::max(data.len() / 2, 64)];
    let (mut in_pos, mut out_pos) = (0, 0);
    loop {
        let (status, bytes_in, bytes_out) = compress(
            &mut compressor,
            &data[in_pos..],
            &mut output[out_pos..],
            TDEFLFlush::Finish,
        );
        in_pos += bytes_in;
        out_pos += bytes_out;
        match status {
            TDEFLStatus::Done => {
                output.truncate(out_pos);
                return Ok(output);
            }
            TDEFLStatus::Okay => {
                if output.len() - out_pos < 64 {
                    output.resize(output.len() * 2, 0);
                }
            }
            status => {
                return Err(EncodeError::CompressionFailure(format!(
                    "compressor stopped with {status:?} after {in_pos} of {} bytes",
                    data.len()
                )))
            }
        }
    }
}

pub(crate) fn decompress_data(compressed_data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decompress_to_vec_zlib(compressed_data)
        .map_err(|e| DecodeError::Decompression(format!("{e:?}")))
}
