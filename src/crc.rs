const POLYNOMIAL: u32 = 0xedb88320;

/// Byte-at-a-time lookup table, built at compile time and never mutated.
static CRC_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0; 256];
    let mut n = 0;
    while n < table.len() {
        let mut c = n as u32;
        let mut round = 0;
        while round < 8 {
            c = if c & 1 != 0 { POLYNOMIAL ^ (c >> 1) } else { c >> 1 };
            round += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

pub(crate) fn calculate_crc<I: IntoIterator<Item = u8>>(data: I) -> u32 {
    let crc = data.into_iter().fold(u32::MAX, |crc, byte| {
        CRC_TABLE[((crc ^ byte as u32) & 0xff) as usize] ^ (crc >> 8)
    });
    !crc
}

/// CRC-32/ISO-HDLC of `bytes`, the checksum PNG stores after every chunk.
pub fn crc32(bytes: &[u8]) -> u32 {
    calculate_crc(bytes.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::{calculate_crc, crc32, CRC_TABLE};

    #[test]
    fn empty_input() {
        assert_eq!(crc32(b""), 0x00000000);
    }

    #[test]
    fn reference_values() {
        assert_eq!(
            crc32(b"The quick brown fox jumps over the lazy dog"),
            0x414fa339
        );
        assert_eq!(crc32(b"123456789"), 0xcbf43926);
        assert_eq!(crc32(b"IEND"), 0xae426082);
    }

    #[test]
    fn table_entries() {
        assert_eq!(CRC_TABLE[0], 0);
        assert_eq!(CRC_TABLE[1], 0x77073096);
        assert_eq!(CRC_TABLE[255], 0x2d02ef8d);
    }

    #[test]
    fn iterator_form_matches_slice_form() {
        let chained = calculate_crc(b"IHDR".iter().chain(b"payload".iter()).copied());
        assert_eq!(chained, crc32(b"IHDRpayload"));
    }
}
