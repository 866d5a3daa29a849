use icon_png::{
    chunks::{self, Chunk},
    crc32, decode, encode, EncodeError, Encoder, EncoderOptions, GlowIcon, Pixel, PixelSource,
    Validation,
};
use miniz_oxide::inflate::decompress_to_vec_zlib;

const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

fn gradient(x: u32, y: u32, w: u32, h: u32) -> [u8; 4] {
    [
        (x * 255 / w) as u8,
        (y * 255 / h) as u8,
        ((x + y) % 256) as u8,
        255 - (x % 7) as u8,
    ]
}

/// Splits a PNG into `(type, data)` pairs by hand, checking length and CRC fields.
fn raw_chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
    let mut rest = &png[8..];
    let mut chunks = vec![];
    while !rest.is_empty() {
        let len = u32::from_be_bytes(rest[0..4].try_into().unwrap()) as usize;
        let chunk_type: [u8; 4] = rest[4..8].try_into().unwrap();
        let data = rest[8..8 + len].to_vec();
        let crc = u32::from_be_bytes(rest[8 + len..12 + len].try_into().unwrap());
        assert_eq!(crc, crc32(&rest[4..8 + len]));
        chunks.push((chunk_type, data));
        rest = &rest[12 + len..];
    }
    chunks
}

#[test]
fn starts_with_signature() {
    for (w, h) in [(1, 1), (1, 9), (9, 1), (64, 64), (3, 200)] {
        let png = encode(w, h, &gradient).unwrap();
        assert_eq!(png[..8], SIGNATURE, "{w}x{h}");
    }
}

#[test]
fn exactly_ihdr_idat_iend() {
    let png = encode(5, 3, &gradient).unwrap();
    let types: Vec<_> = raw_chunks(&png).into_iter().map(|(t, _)| t).collect();
    assert_eq!(types, [*b"IHDR", *b"IDAT", *b"IEND"]);

    let (rest, _) = chunks::parse_signature(&png).unwrap();
    let parsed: Vec<_> = chunks::iter_chunks(rest)
        .collect::<anyhow::Result<_>>()
        .unwrap();
    assert_eq!(parsed.len(), 3);
    assert!(matches!(parsed[0], Chunk::IHDR(_)));
    assert!(matches!(parsed[1], Chunk::IDAT(_)));
    assert!(matches!(parsed[2], Chunk::IEND));
}

#[test]
fn header_fields() {
    let png = encode(300, 17, &gradient).unwrap();
    let chunks = raw_chunks(&png);
    let ihdr = &chunks[0].1;
    assert_eq!(ihdr.len(), 13);
    assert_eq!(u32::from_be_bytes(ihdr[0..4].try_into().unwrap()), 300);
    assert_eq!(u32::from_be_bytes(ihdr[4..8].try_into().unwrap()), 17);
    assert_eq!(ihdr[8..], [8, 6, 0, 0, 0]);
    assert!(chunks[2].1.is_empty());
}

#[test]
fn idat_holds_unfiltered_scanlines() {
    let (w, h) = (7u32, 4u32);
    let png = encode(w, h, &gradient).unwrap();
    let raw = decompress_to_vec_zlib(&raw_chunks(&png)[1].1).unwrap();
    let row = (w * 4 + 1) as usize;
    assert_eq!(raw.len(), row * h as usize);
    for y in 0..h {
        let start = y as usize * row;
        assert_eq!(raw[start], 0);
        for x in 0..w {
            let offset = start + 1 + x as usize * 4;
            assert_eq!(raw[offset..offset + 4], gradient(x, y, w, h), "({x}, {y})");
        }
    }
}

#[test]
fn standard_decoder_reads_flat_image() {
    let flat = |_x: u32, _y: u32, _w: u32, _h: u32| [10u8, 20, 30, 255];
    let png = encode(2, 2, &flat).unwrap();

    let decoder = png::Decoder::new(png.as_slice());
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!((info.width, info.height), (2, 2));
    assert_eq!(info.color_type, png::ColorType::Rgba);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    assert_eq!(buf[..info.buffer_size()], [10u8, 20, 30, 255].repeat(4));

    let image = decode(&png).unwrap();
    assert!(image.pixels.iter().all(|p| *p == Pixel::new(10, 20, 30, 255)));
}

#[test]
fn standard_decoder_reads_artwork() {
    let icon = GlowIcon::default();
    let png = encode(48, 48, &icon).unwrap();

    let mut reader = png::Decoder::new(png.as_slice()).read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    for (i, rgba) in buf[..info.buffer_size()].chunks_exact(4).enumerate() {
        let (x, y) = (i as u32 % 48, i as u32 / 48);
        let expected = icon.color_at(x, y, 48, 48).map(|c| c as u8);
        assert_eq!(rgba, expected, "({x}, {y})");
    }
}

#[test]
fn encoding_is_deterministic() {
    let icon = GlowIcon::default();
    assert_eq!(
        encode(96, 96, &icon).unwrap(),
        encode(96, 96, &icon).unwrap()
    );
    let fast = Encoder::new(EncoderOptions {
        compression_level: 1,
        validation: Validation::Strict,
    });
    assert_eq!(
        fast.encode(31, 17, &gradient).unwrap(),
        fast.encode(31, 17, &gradient).unwrap()
    );
}

#[test]
fn zero_dimensions_are_rejected() {
    assert_eq!(
        encode(0, 5, &gradient),
        Err(EncodeError::InvalidDimensions {
            width: 0,
            height: 5
        })
    );
    assert_eq!(
        encode(5, 0, &gradient),
        Err(EncodeError::InvalidDimensions {
            width: 5,
            height: 0
        })
    );
}

#[test]
fn crc_reference_values() {
    assert_eq!(crc32(b""), 0);
    assert_eq!(
        crc32(b"The quick brown fox jumps over the lazy dog"),
        0x414fa339
    );
}

#[test]
fn smallest_png_snapshot() {
    let png = encode(1, 1, &|_x: u32, _y: u32, _w: u32, _h: u32| [0u8, 0, 0, 0]).unwrap();
    let summary: Vec<String> = raw_chunks(&png)
        .iter()
        .map(|(t, data)| format!("{} {}", String::from_utf8_lossy(t), data.len()))
        .filter(|line| !line.starts_with("IDAT"))
        .collect();
    insta::assert_snapshot!(summary.join("\n"), @r###"
    IHDR 13
    IEND 0
    "###);
}
