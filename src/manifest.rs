//! Where a Flutter-style project expects its launcher icons, and at which sizes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const IOS_ICON_SET: &str = "ios/Runner/Assets.xcassets/AppIcon.appiconset";

const ANDROID_ICONS: [(&str, u32); 5] = [
    ("android/app/src/main/res/mipmap-mdpi", 48),
    ("android/app/src/main/res/mipmap-hdpi", 72),
    ("android/app/src/main/res/mipmap-xhdpi", 96),
    ("android/app/src/main/res/mipmap-xxhdpi", 144),
    ("android/app/src/main/res/mipmap-xxxhdpi", 192),
];

const WEB_ICONS: [(&str, u32); 5] = [
    ("favicon.png", 64),
    ("web/icons/Icon-192.png", 192),
    ("web/icons/Icon-512.png", 512),
    ("web/icons/Icon-maskable-192.png", 192),
    ("web/icons/Icon-maskable-512.png", 512),
];

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed icon manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unrecognised icon size {0:?}")]
    Size(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
}

/// One PNG file to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTarget {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}
impl IconTarget {
    fn square(path: impl Into<PathBuf>, size: u32) -> Self {
        Self {
            path: path.into(),
            width: size,
            height: size,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AssetCatalog {
    #[serde(default)]
    images: Vec<CatalogImage>,
}

#[derive(Debug, Deserialize)]
struct CatalogImage {
    filename: Option<String>,
    size: Option<CatalogSize>,
    scale: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogSize {
    Points(f64),
    Text(String),
}
impl CatalogSize {
    fn points(&self) -> Result<(f64, f64), ManifestError> {
        match self {
            CatalogSize::Points(side) => Ok((*side, *side)),
            CatalogSize::Text(text) => {
                let parse = |part: &str| part.trim().parse::<f64>().ok();
                let points = match text.split_once('x') {
                    Some((w, h)) => parse(w).zip(parse(h)),
                    None => parse(text).map(|side| (side, side)),
                };
                points.ok_or_else(|| ManifestError::Size(text.clone()))
            }
        }
    }
}

/// Reads a leading decimal number, so `"2x"` is 2 and `"3"` is 3.
fn parse_scale(scale: &str) -> Option<f64> {
    let scale = scale.trim();
    let end = scale
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(scale.len());
    scale[..end].parse().ok()
}

/// Scales a point size to pixels. Anything that doesn't come out as a positive
/// number of pixels becomes a single pixel.
fn to_pixels(points: f64, scale: f64) -> u32 {
    let pixels = (points * scale).round();
    if pixels.is_finite() && pixels >= 1.0 {
        pixels.min(u32::MAX as f64) as u32
    } else {
        1
    }
}

/// Parses an Xcode `Contents.json` asset catalog. Entries without a filename are
/// slots the project leaves empty and are skipped. Paths are relative to the catalog.
pub fn parse_ios_manifest(json: &str) -> Result<Vec<IconTarget>, ManifestError> {
    let catalog: AssetCatalog = serde_json::from_str(json)?;
    let mut targets = vec![];
    for image in catalog.images {
        let Some(filename) = image.filename else {
            continue;
        };
        let (w, h) = match &image.size {
            Some(size) => size.points()?,
            None => (f64::NAN, f64::NAN),
        };
        let scale = image.scale.as_deref().and_then(parse_scale).unwrap_or(1.0);
        targets.push(IconTarget {
            path: PathBuf::from(filename),
            width: to_pixels(w, scale),
            height: to_pixels(h, scale),
        });
    }
    Ok(targets)
}

pub fn android_targets() -> Vec<IconTarget> {
    ANDROID_ICONS
        .iter()
        .map(|(dir, size)| IconTarget::square(Path::new(dir).join("ic_launcher.png"), *size))
        .collect()
}

pub fn web_targets() -> Vec<IconTarget> {
    WEB_ICONS
        .iter()
        .map(|(path, size)| IconTarget::square(*path, *size))
        .collect()
}

/// Reads the iOS asset catalog under `root` and returns its icons with paths under `root`.
pub fn ios_targets(root: &Path) -> Result<Vec<IconTarget>, ManifestError> {
    let icon_set = root.join(IOS_ICON_SET);
    let contents_path = icon_set.join("Contents.json");
    let json = fs::read_to_string(&contents_path).map_err(|source| ManifestError::Io {
        path: contents_path.clone(),
        source,
    })?;
    Ok(parse_ios_manifest(&json)?
        .into_iter()
        .map(|target| IconTarget {
            path: icon_set.join(target.path),
            ..target
        })
        .collect())
}

/// Every icon the given platforms need, with paths under `root`. Platforms are
/// visited in the order given.
pub fn project_targets(
    root: &Path,
    platforms: &[Platform],
) -> Result<Vec<IconTarget>, ManifestError> {
    let mut targets = vec![];
    for platform in platforms {
        match platform {
            Platform::Android => targets.extend(android_targets().into_iter().map(|t| IconTarget {
                path: root.join(t.path),
                ..t
            })),
            Platform::Ios => targets.extend(ios_targets(root)?),
            Platform::Web => targets.extend(web_targets().into_iter().map(|t| IconTarget {
                path: root.join(t.path),
                ..t
            })),
        }
    }
    Ok(targets)
}
