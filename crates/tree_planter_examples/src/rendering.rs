use std::path::Path;

use glam::DVec2;
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;
use tree_planter::prelude::*;

/// Install a `fmt` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// RGB for a CSS-style color name or `#rrggbb`; gray when unknown.
pub fn named_color(name: &str) -> [u8; 3] {
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            if let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) {
                return [r, g, b];
            }
        }
    }
    match name.to_ascii_lowercase().as_str() {
        "red" => [220, 50, 47],
        "green" => [80, 170, 70],
        "yellow" => [240, 210, 60],
        "blue" => [60, 110, 220],
        "purple" => [150, 80, 190],
        "orange" => [245, 140, 40],
        "white" => [245, 245, 245],
        "pink" => [240, 130, 180],
        "brown" => [140, 90, 50],
        "black" => [20, 20, 20],
        _ => [128, 128, 128],
    }
}

/// Image size, colors, and dot size for [`render_planting_to_png`].
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    pub boundary_color: [u8; 3],
    pub tree_radius: i32,
    pub margin_px: u32,
    species_colors: Vec<(SpeciesId, [u8; 3])>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [24, 32, 24],
            boundary_color: [230, 230, 210],
            tree_radius: 3,
            margin_px: 20,
            species_colors: Vec::new(),
        }
    }

    /// Colors taken from each species' `color` name.
    pub fn for_catalog(image_size: (u32, u32), catalog: &SpeciesCatalog) -> Self {
        let mut config = Self::new(image_size);
        for species in catalog.iter() {
            config.set_species_color(species.id.clone(), named_color(&species.color));
        }
        config
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_tree_radius(mut self, tree_radius: i32) -> Self {
        self.tree_radius = tree_radius;
        self
    }

    pub fn set_species_color(&mut self, id: impl Into<SpeciesId>, color: [u8; 3]) {
        let id = id.into();
        match self.species_colors.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = color,
            None => self.species_colors.push((id, color)),
        }
    }

    fn species_color(&self, id: &str) -> [u8; 3] {
        self.species_colors
            .iter()
            .find(|(existing, _)| existing == id)
            .map_or([128, 128, 128], |(_, c)| *c)
    }
}

/// Maps (longitude, latitude) onto pixels, north up, preserving aspect ratio.
struct Projection {
    min: DVec2,
    scale: f64,
    height: f64,
    margin: f64,
}

impl Projection {
    fn fit(min: DVec2, max: DVec2, config: &RenderConfig) -> Self {
        let margin = config.margin_px as f64;
        let (w, h) = (config.image_size.0 as f64, config.image_size.1 as f64);
        let span = (max - min).max(DVec2::splat(f64::EPSILON));
        let scale = ((w - 2.0 * margin) / span.x)
            .min((h - 2.0 * margin) / span.y)
            .max(0.0);
        Self {
            min,
            scale,
            height: h,
            margin,
        }
    }

    fn to_pixel(&self, p: DVec2) -> (f64, f64) {
        let local = (p - self.min) * self.scale;
        (self.margin + local.x, self.height - self.margin - local.y)
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

fn draw_line(img: &mut RgbImage, a: (f64, f64), b: (f64, f64), color: [u8; 3]) {
    let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = a.0 + (b.0 - a.0) * t;
        let y = a.1 + (b.1 - a.1) * t;
        put(img, x.round() as i64, y.round() as i64, color);
    }
}

fn draw_dot(img: &mut RgbImage, center: (f64, f64), radius: i32, color: [u8; 3]) {
    let (cx, cy) = (center.0.round() as i64, center.1.round() as i64);
    let r = radius.max(0) as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw boundary outlines and one colored dot per planted tree, then save as PNG.
pub fn render_planting_to_png(
    boundaries: &[Boundary],
    result: &PlantingResult,
    config: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    let extent = boundaries
        .iter()
        .filter_map(Boundary::bounds)
        .chain(result.assignments.iter().map(|t| (t.position, t.position)))
        .reduce(|(amin, amax), (bmin, bmax)| (amin.min(bmin), amax.max(bmax)));

    if let Some((min, max)) = extent {
        let projection = Projection::fit(min, max, config);

        for boundary in boundaries {
            let vertices = boundary.vertices();
            for (i, &a) in vertices.iter().enumerate() {
                let b = vertices[(i + 1) % vertices.len()];
                draw_line(
                    &mut img,
                    projection.to_pixel(a),
                    projection.to_pixel(b),
                    config.boundary_color,
                );
            }
        }

        for tree in &result.assignments {
            draw_dot(
                &mut img,
                projection.to_pixel(tree.position),
                config.tree_radius,
                config.species_color(&tree.species_id),
            );
        }
    }

    let out_path = out_path.as_ref();
    img.save(out_path)?;
    tracing::info!("Wrote {}", out_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_resolve_names_and_hex() {
        assert_eq!(named_color("Red"), [220, 50, 47]);
        assert_eq!(named_color("#0a0B0c"), [10, 11, 12]);
        assert_eq!(named_color("#12"), [128, 128, 128]);
        assert_eq!(named_color("teal"), [128, 128, 128]);
    }

    #[test]
    fn catalog_colors_are_registered() {
        let config = RenderConfig::for_catalog((64, 64), &SpeciesCatalog::orchard());
        assert_eq!(config.species_color("L"), named_color("green"));
        assert_eq!(config.species_color("?"), [128, 128, 128]);
    }

    #[test]
    fn projection_puts_north_at_the_top() {
        let config = RenderConfig::new((120, 120));
        let projection = Projection::fit(DVec2::ZERO, DVec2::new(1.0, 1.0), &config);
        let (_, south) = projection.to_pixel(DVec2::new(0.5, 0.0));
        let (_, north) = projection.to_pixel(DVec2::new(0.5, 1.0));
        assert!(north < south);
        assert_eq!(projection.to_pixel(DVec2::ZERO), (20.0, 100.0));
    }
}
