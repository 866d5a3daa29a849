//! The launcher icon design: a golden radial glow on a dark navy field, crossed by a
//! light band and a diagonal highlight, with a small accent disc in the upper right.

use crate::pixel::PixelSource;

const BASE: [f64; 3] = [9.0, 13.0, 45.0];
const HIGHLIGHT: [f64; 3] = [255.0, 196.0, 71.0];

const ACCENT: [i32; 4] = [255, 220, 90, 255];
const STRIPE: [i32; 4] = [255, 255, 255, 255];
const BAND: [i32; 4] = [255, 255, 255, 220];
const CORE: [i32; 4] = [64, 128, 255, 255];

/// Proportions of the design, as fractions of the icon width or height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowIcon {
    pub glow_radius: f64,
    pub accent_center: (f64, f64),
    pub accent_radius: f64,
    pub stripe_half_width: f64,
    pub band_offset: f64,
    pub band_half_height: f64,
    pub band_start: f64,
    pub core_half_size: f64,
}
impl Default for GlowIcon {
    fn default() -> Self {
        Self {
            glow_radius: 0.35,
            accent_center: (0.75, 0.25),
            accent_radius: 0.08,
            stripe_half_width: 0.01,
            band_offset: 0.15,
            band_half_height: 0.015,
            band_start: 0.35,
            core_half_size: 0.03,
        }
    }
}

impl PixelSource for GlowIcon {
    type Channel = i32;

    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> [i32; 4] {
        let (x, y) = (f64::from(x), f64::from(y));
        let (w, h) = (f64::from(width), f64::from(height));
        let (cx, cy) = (w / 2.0, h / 2.0);
        // Glow and core are measured from pixel centres, the rest from pixel corners.
        let (dx, dy) = (x + 0.5 - cx, y + 0.5 - cy);
        let distance = dx.hypot(dy);
        let radius = w * self.glow_radius;

        let (ax, ay) = self.accent_center;
        if (x - w * ax).hypot(y - h * ay) < w * self.accent_radius {
            return ACCENT;
        }

        if ((x - cx) - (y - cy)).abs() < w * self.stripe_half_width && x > cx && y > cy {
            return STRIPE;
        }

        if (y - (cy - h * self.band_offset)).abs() < h * self.band_half_height
            && x > w * self.band_start
        {
            return BAND;
        }

        if distance < radius {
            let glow = (1.0 - distance / radius).max(0.0);
            let blend = |i: usize| (BASE[i] + (HIGHLIGHT[i] - BASE[i]) * glow).round() as i32;
            return [blend(0), blend(1), blend(2), 255];
        }

        if dx.abs() < w * self.core_half_size && dy.abs() < h * self.core_half_size {
            return CORE;
        }

        [BASE[0] as i32, BASE[1] as i32, BASE[2] as i32, 255]
    }
}
