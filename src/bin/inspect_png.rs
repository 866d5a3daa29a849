use anyhow::{anyhow, Context};
use icon_png::chunks::{self, Chunk};

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let file_name = std::env::args()
        .nth(1)
        .context("usage: inspect-png <file.png>")?;
    let input = std::fs::read(&file_name).with_context(|| format!("Failed to read {file_name}"))?;
    let (rest, sig) = chunks::parse_signature(&input)
        .map_err(|_| anyhow!("{file_name} doesn't start with the PNG signature"))?;
    println!("{:02x?}", sig);
    for chunk in chunks::iter_chunks(rest) {
        match chunk? {
            Chunk::IHDR(ihdr) => println!("IHDR {ihdr:?}"),
            Chunk::IDAT(idat) => println!("IDAT {} bytes", idat.data.len()),
            Chunk::IEND => println!("IEND"),
            Chunk::Unknown(raw) => println!("{} {} bytes", raw.chunk_type.as_str(), raw.data.len()),
        }
    }
    match icon_png::decode(&input) {
        Ok(image) => println!("{}x{} RGBA, {} pixels", image.width, image.height, image.pixels.len()),
        Err(e) => log::warn!("Not decodable as plain RGBA: {e}"),
    }
    Ok(())
}
