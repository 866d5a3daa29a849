#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}
impl Pixel {
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}
impl From<[u8; 4]> for Pixel {
    fn from([red, green, blue, alpha]: [u8; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

/// A color component as produced by a [`PixelSource`].
///
/// Sources that blend or round in a wider integer type can return it directly and
/// let the encoder decide whether an out-of-range value is an error.
pub trait Channel: Copy {
    /// The value as a byte, or the raw value when it lies outside `0..=255`.
    fn checked_byte(self) -> Result<u8, i64>;
    /// The low eight bits of the value.
    fn wrapping_byte(self) -> u8;
}

impl Channel for u8 {
    fn checked_byte(self) -> Result<u8, i64> {
        Ok(self)
    }

    fn wrapping_byte(self) -> u8 {
        self
    }
}

macro_rules! wide_channel {
    ($($t:ty),*) => {
        $(
            impl Channel for $t {
                fn checked_byte(self) -> Result<u8, i64> {
                    u8::try_from(self).map_err(|_| self as i64)
                }

                fn wrapping_byte(self) -> u8 {
                    self as u8
                }
            }
        )*
    };
}
wide_channel!(u16, u32, i16, i32, i64);

/// Supplies the RGBA color of every pixel, given its position and the image size.
///
/// The encoder calls it once per pixel in row-major order. Implementations should be
/// pure so that encoding the same image twice yields identical bytes.
pub trait PixelSource {
    type Channel: Channel;

    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> [Self::Channel; 4];
}

impl<F, C> PixelSource for F
where
    F: Fn(u32, u32, u32, u32) -> [C; 4],
    C: Channel,
{
    type Channel = C;

    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> [C; 4] {
        self(x, y, width, height)
    }
}
