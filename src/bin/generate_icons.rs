use anyhow::Context;
use icon_png::{manifest, write_icon, Encoder, GeneratorConfig, GlowIcon};
use std::{fs, path::Path};

fn main() -> anyhow::Result<()> {
    let args: Vec<_> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|arg| arg == "-v");
    let verbosity = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .parse_default_env()
        .init();

    let config = match args.iter().find(|arg| *arg != "-v") {
        Some(path) => GeneratorConfig::load(Path::new(path))?,
        None => GeneratorConfig::default(),
    };
    log::debug!("{config:?}");

    let targets = manifest::project_targets(&config.root, &config.platforms)
        .context("Failed to collect icon targets")?;
    let encoder = Encoder::new(config.encoder_options());
    let icon = GlowIcon::default();

    let mut written = Vec::with_capacity(targets.len());
    for target in &targets {
        write_icon(&target.path, target.width, target.height, &icon, &encoder)?;
        written.push(serde_json::json!({
            "path": target
                .path
                .strip_prefix(&config.root)
                .unwrap_or(&target.path)
                .display()
                .to_string(),
            "width": target.width,
            "height": target.height,
        }));
    }

    if let Some(report) = &config.report {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
        let results = serde_json::json!({
            "date": now,
            "icons": written,
        });
        let report_path = config.root.join(report);
        fs::write(&report_path, results.to_string())
            .with_context(|| format!("Failed to write {}", report_path.display()))?;
    }

    log::info!("icons regenerated");
    Ok(())
}
