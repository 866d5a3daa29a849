use log::{debug, trace};

use crate::{
    chunks::{idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, ChunkPayload, SIGNATURE},
    error::EncodeError,
    image_data::{compress_data, DEFAULT_COMPRESSION_LEVEL},
    pixel::PixelSource,
    scanlines::{build_scanlines, Validation},
};

/// PNG caps both dimensions at 2^31 - 1.
const MAX_DIMENSION: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// miniz level, 0 to 10. Defaults to 9; lower levels are an opt-in for faster,
    /// larger output and still produce a valid zlib stream.
    pub compression_level: u8,
    pub validation: Validation,
}
impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            validation: Validation::Strict,
        }
    }
}

/// Writes single-IDAT, non-interlaced, 8-bit RGBA PNG files.
#[derive(Debug, Default, Clone, Copy)]
pub struct Encoder {
    options: EncoderOptions,
}

impl Encoder {
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EncoderOptions {
        self.options
    }

    /// Produces a complete PNG file, calling `source` once for every pixel.
    pub fn encode<S>(&self, width: u32, height: u32, source: &S) -> Result<Vec<u8>, EncodeError>
    where
        S: PixelSource + ?Sized,
    {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(EncodeError::InvalidDimensions { width, height });
        }

        let raw = build_scanlines(width, height, source, self.options.validation)?;
        let compressed = compress_data(&raw, self.options.compression_level)?;
        debug!(
            "Encoding {width}x{height}: {} raw bytes deflated to {}",
            raw.len(),
            compressed.len()
        );

        let ihdr = IHDRChunk::rgba8(width, height).to_bytes()?;
        let idat = IDATChunk { data: &compressed }.to_bytes()?;
        let iend = IENDChunk.to_bytes()?;
        trace!(
            "Chunk sizes: IHDR {}, IDAT {}, IEND {}",
            ihdr.len(),
            idat.len(),
            iend.len()
        );

        let mut png = Vec::with_capacity(SIGNATURE.len() + ihdr.len() + idat.len() + iend.len());
        png.extend(SIGNATURE);
        png.extend(ihdr);
        png.extend(idat);
        png.extend(iend);
        Ok(png)
    }
}

/// Encodes with the default options: best compression, strict pixel validation.
pub fn encode<S>(width: u32, height: u32, source: &S) -> Result<Vec<u8>, EncodeError>
where
    S: PixelSource + ?Sized,
{
    Encoder::default().encode(width, height, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(_x: u32, _y: u32, _w: u32, _h: u32) -> [u8; 4] {
        [10, 20, 30, 255]
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            encode(0, 5, &flat),
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert_eq!(
            encode(5, 0, &flat),
            Err(EncodeError::InvalidDimensions {
                width: 5,
                height: 0
            })
        );
    }

    #[test]
    fn rejects_dimensions_past_png_limit() {
        assert!(matches!(
            encode(1 << 31, 1, &flat),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn layout_of_smallest_image() {
        let png = encode(1, 1, &flat).unwrap();
        assert_eq!(&png[..8], SIGNATURE);
        assert_eq!(&png[8..16], b"\x00\x00\x00\x0dIHDR");
        assert_eq!(&png[png.len() - 12..], b"\x00\x00\x00\x00IEND\xae\x42\x60\x82");
        let idat_len = u32::from_be_bytes([png[33], png[34], png[35], png[36]]) as usize;
        assert_eq!(&png[37..41], b"IDAT");
        assert_eq!(png.len(), 8 + 25 + idat_len + 12 + 12);
    }

    #[test]
    fn compression_level_changes_only_idat() {
        let fast = Encoder::new(EncoderOptions {
            compression_level: 1,
            ..Default::default()
        });
        let a = fast.encode(16, 16, &flat).unwrap();
        let b = encode(16, 16, &flat).unwrap();
        assert_eq!(a[..33], b[..33]);
        assert_eq!(a[a.len() - 12..], b[b.len() - 12..]);
    }

    #[test]
    fn stored_level_still_decodes() {
        let stored = Encoder::new(EncoderOptions {
            compression_level: 0,
            ..Default::default()
        });
        let png = stored.encode(5, 4, &flat).unwrap();
        assert!(png.len() > encode(5, 4, &flat).unwrap().len());
        let image = crate::decode(&png).unwrap();
        assert!(image.pixels.iter().all(|p| p.to_bytes() == flat(0, 0, 5, 4)));
    }

    #[test]
    fn strict_mode_surfaces_bad_pixels() {
        let source = |x: u32, _y: u32, _w: u32, _h: u32| [x as i32 * 200, 0, 0, 255];
        assert!(matches!(
            encode(3, 1, &source),
            Err(EncodeError::InvalidPixelValue { x: 2, value: 400, .. })
        ));
        let lenient = Encoder::new(EncoderOptions {
            validation: Validation::Off,
            ..Default::default()
        });
        assert!(lenient.encode(3, 1, &source).is_ok());
    }
}
