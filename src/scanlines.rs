use crate::{
    error::EncodeError,
    pixel::{Channel, PixelSource},
};

/// Filter type tag written at the start of every scanline.
pub(crate) const FILTER_NONE: u8 = 0;

const CHANNEL_NAMES: [&str; 4] = ["red", "green", "blue", "alpha"];

/// How the scanline builder treats channel values outside `0..=255`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Fail with [`EncodeError::InvalidPixelValue`].
    #[default]
    Strict,
    /// Store the low eight bits unchecked.
    Off,
}

/// Bytes per scanline of an 8-bit RGBA image, filter tag included.
pub(crate) fn scanline_width(width: u32) -> Option<usize> {
    (width as usize).checked_mul(4)?.checked_add(1)
}

/// Builds the uncompressed image stream: one filter tag followed by `width` RGBA
/// pixels per row, rows top to bottom.
pub(crate) fn build_scanlines<S>(
    width: u32,
    height: u32,
    source: &S,
    validation: Validation,
) -> Result<Vec<u8>, EncodeError>
where
    S: PixelSource + ?Sized,
{
    let row_length = scanline_width(width);
    let total = row_length.and_then(|row| row.checked_mul(height as usize));
    let (Some(row_length), Some(total)) = (row_length, total) else {
        return Err(EncodeError::InvalidDimensions { width, height });
    };

    let mut raw = Vec::with_capacity(total);
    for y in 0..height {
        raw.push(FILTER_NONE);
        for x in 0..width {
            let color = source.color_at(x, y, width, height);
            for (channel, value) in color.into_iter().enumerate() {
                let byte = match validation {
                    Validation::Strict => {
                        value
                            .checked_byte()
                            .map_err(|value| EncodeError::InvalidPixelValue {
                                x,
                                y,
                                channel: CHANNEL_NAMES[channel],
                                value,
                            })?
                    }
                    Validation::Off => value.wrapping_byte(),
                };
                raw.push(byte);
            }
        }
        debug_assert_eq!(raw.len(), (y as usize + 1) * row_length);
    }
    Ok(raw)
}
