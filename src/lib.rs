pub mod artwork;
pub mod chunks;
mod config;
mod crc;
mod decoder;
mod encoder;
mod error;
mod image_data;
pub mod manifest;
mod output;
mod pixel;
mod scanlines;

pub use artwork::GlowIcon;
pub use config::GeneratorConfig;
pub use crc::crc32;
pub use decoder::{decode, DecodedImage};
pub use encoder::{encode, Encoder, EncoderOptions};
pub use error::{DecodeError, EncodeError};
pub use image_data::DEFAULT_COMPRESSION_LEVEL;
pub use output::write_icon;
pub use pixel::{Channel, Pixel, PixelSource};
pub use scanlines::Validation;
