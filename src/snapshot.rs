//! Headless rendering through the CPU projection model.

use crate::error::GlobeResult;
use crate::projection::{self, TextureSampler};
use crate::renderer::camera::GlobeRotation;
use crate::solar::Illumination;
use crate::texture::DecodedTexture;
use std::path::Path;

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Samples a decoded map the way the globe pass samples the offscreen target:
/// rows addressed bottom-up, bilinear, wrapping horizontally, linear colour.
pub struct MapSampler<'a> {
    map: &'a DecodedTexture,
}

impl<'a> MapSampler<'a> {
    pub fn new(map: &'a DecodedTexture) -> Self {
        Self { map }
    }

    fn texel(&self, x: i64, y: i64) -> [f32; 4] {
        let w = self.map.width as i64;
        let h = self.map.height as i64;
        let x = x.rem_euclid(w) as u32;
        // offscreen row 0 is the map's bottom row
        let y = (h - 1 - y.clamp(0, h - 1)) as u32;
        let p = self.map.rgba.get_pixel(x, y).0;
        [
            srgb_to_linear(p[0] as f32 / 255.0),
            srgb_to_linear(p[1] as f32 / 255.0),
            srgb_to_linear(p[2] as f32 / 255.0),
            p[3] as f32 / 255.0,
        ]
    }
}

impl TextureSampler for MapSampler<'_> {
    fn sample(&self, uv: [f32; 2]) -> [f32; 4] {
        let fx = uv[0] * self.map.width as f32 - 0.5;
        let fy = uv[1] * self.map.height as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let a = self.texel(x0, y0);
        let b = self.texel(x0 + 1, y0);
        let c = self.texel(x0, y0 + 1);
        let d = self.texel(x0 + 1, y0 + 1);

        let mut out = [0.0; 4];
        for i in 0..4 {
            let top = a[i] + (b[i] - a[i]) * tx;
            let bottom = c[i] + (d[i] - c[i]) * tx;
            out[i] = top + (bottom - top) * ty;
        }
        out
    }
}

/// Renders the globe at zoom 1 into a `width` x `height` image. Pixel rows use
/// the same flipped V as the on-screen quad.
pub fn render_globe(
    map: &DecodedTexture,
    width: u32,
    height: u32,
    rotation: &GlobeRotation,
    sun: &Illumination,
) -> image::RgbaImage {
    let sampler = MapSampler::new(map);

    image::RgbaImage::from_fn(width, height, |px, py| {
        let uv = [
            (px as f32 + 0.5) / width as f32,
            1.0 - (py as f32 + 0.5) / height as f32,
        ];
        let color = projection::shade(uv, rotation, sun, &sampler);
        let encode = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
        image::Rgba([
            encode(color[0]),
            encode(color[1]),
            encode(color[2]),
            (color[3].clamp(0.0, 1.0) * 255.0).round() as u8,
        ])
    })
}

pub fn write_snapshot(
    path: &Path,
    map: &DecodedTexture,
    width: u32,
    height: u32,
    sun: &Illumination,
) -> GlobeResult<()> {
    let image = render_globe(map, width, height, &GlobeRotation::default(), sun);
    image.save(path)?;
    log::info!("Wrote {}x{} snapshot to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    /// Top half red, bottom half blue.
    fn two_band_map() -> DecodedTexture {
        let rgba = image::RgbaImage::from_fn(16, 8, |_, y| {
            if y < 4 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        DecodedTexture {
            rgba,
            width: 16,
            height: 8,
        }
    }

    fn noon_over_greenwich() -> Illumination {
        Illumination {
            declination: 0.0,
            hour_angle: 0.0,
        }
    }

    #[test]
    fn corners_are_transparent() {
        let image = render_globe(
            &two_band_map(),
            40,
            36,
            &GlobeRotation::default(),
            &noon_over_greenwich(),
        );
        for (x, y) in [(0, 0), (39, 0), (0, 35), (39, 35)] {
            assert_eq!(image.get_pixel(x, y).0, [0, 0, 0, 0]);
        }
    }

    #[test]
    fn north_is_up() {
        // Greenwich faces the viewer and the sun.
        let image = render_globe(
            &two_band_map(),
            41,
            41,
            &GlobeRotation::new(PI, 0.0),
            &noon_over_greenwich(),
        );
        let upper = image.get_pixel(20, 10).0;
        let lower = image.get_pixel(20, 30).0;
        assert!(upper[0] > 100 && upper[2] == 0, "upper {:?}", upper);
        assert!(lower[2] > 100 && lower[0] == 0, "lower {:?}", lower);
        assert_eq!(upper[3], 255);
    }

    #[test]
    fn far_side_of_the_sun_is_black() {
        let image = render_globe(
            &two_band_map(),
            41,
            41,
            &GlobeRotation::default(),
            &noon_over_greenwich(),
        );
        assert_eq!(image.get_pixel(20, 20).0, [0, 0, 0, 255]);
    }

    #[test]
    fn snapshot_is_written_as_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("globe.png");
        write_snapshot(&path, &two_band_map(), 30, 27, &noon_over_greenwich()).unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (30, 27));
    }
}
