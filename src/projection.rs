//! CPU twin of `renderer/globe.wgsl`.
//!
//! The fragment shader and these functions implement the same orthographic
//! unprojection and Lambert lighting step for step. Keep them in sync: the tests
//! here pin the behaviour the shader is expected to have, and snapshot mode
//! renders through this path.

use crate::renderer::camera::GlobeRotation;
use crate::solar::Illumination;
use nalgebra_glm::Vec3;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Longitude in `[0, 2π)`, latitude in `[-π/2, π/2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoordinate {
    pub longitude: f32,
    pub latitude: f32,
}

pub trait TextureSampler {
    /// RGBA in `[0, 1]` at texture coordinate `uv`, both in `[0, 1]`.
    fn sample(&self, uv: [f32; 2]) -> [f32; 4];
}

/// Recentres a fragment UV onto the unit square `[-1, 1]²`.
pub fn disk_point(uv: [f32; 2]) -> [f32; 2] {
    [uv[0] * 2.0 - 1.0, uv[1] * 2.0 - 1.0]
}

pub fn inside_disk(x: f32, y: f32) -> bool {
    x * x + y * y <= 1.0
}

/// Floored modulo into `[0, 2π)`.
pub fn wrap_longitude(longitude: f32) -> f32 {
    let wrapped = longitude.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

pub fn clamp_latitude(latitude: f32) -> f32 {
    latitude.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Inverse orthographic projection of a disk point, rotated and normalised.
/// `None` outside the unit disk.
pub fn unproject(x: f32, y: f32, rotation: &GlobeRotation) -> Option<SphericalCoordinate> {
    if !inside_disk(x, y) {
        return None;
    }

    let z = (1.0 - x * x - y * y).max(0.0).sqrt();
    let longitude = x.atan2(z) + rotation.yaw;
    let latitude = y.asin() + rotation.pitch;

    Some(SphericalCoordinate {
        longitude: wrap_longitude(longitude),
        latitude: clamp_latitude(latitude),
    })
}

/// Forward orthographic projection of an unrotated coordinate.
pub fn project(coordinate: &SphericalCoordinate) -> [f32; 2] {
    [
        coordinate.latitude.cos() * coordinate.longitude.sin(),
        coordinate.latitude.sin(),
    ]
}

impl SphericalCoordinate {
    /// Equirectangular lookup. `None` when the result leaves `[0, 1]²`, which
    /// only happens for non-finite input.
    pub fn texture_coords(&self) -> Option<[f32; 2]> {
        let u = self.longitude / TAU;
        let v = self.latitude / PI + 0.5;
        if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
            Some([u, v])
        } else {
            None
        }
    }

    /// Geographic position of a texel: the left edge of the map is the
    /// antimeridian, so longitude runs from -π to π.
    pub fn geographic(uv: [f32; 2]) -> Self {
        Self {
            longitude: uv[0] * TAU - PI,
            latitude: (uv[1] - 0.5) * PI,
        }
    }

    pub fn surface_normal(&self) -> Vec3 {
        let (sin_lon, cos_lon) = self.longitude.sin_cos();
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        nalgebra_glm::normalize(&nalgebra_glm::vec3(
            cos_lon * cos_lat,
            sin_lon * cos_lat,
            sin_lat,
        ))
    }
}

pub fn sun_direction(sun: &Illumination) -> Vec3 {
    let hour_angle = sun.hour_angle as f32;
    let declination = sun.declination as f32;
    nalgebra_glm::normalize(&nalgebra_glm::vec3(
        hour_angle.cos(),
        hour_angle.sin(),
        declination.tan(),
    ))
}

/// Lambert term without ambient: the night side is black.
pub fn light_intensity(normal: &Vec3, sun_direction: &Vec3) -> f32 {
    nalgebra_glm::dot(normal, sun_direction).max(0.0)
}

/// Full per-pixel model: fragment UV in, premultiplied-free RGBA out.
pub fn shade<S: TextureSampler>(
    uv: [f32; 2],
    rotation: &GlobeRotation,
    sun: &Illumination,
    texture: &S,
) -> [f32; 4] {
    let [x, y] = disk_point(uv);
    let Some(coordinate) = unproject(x, y, rotation) else {
        return TRANSPARENT;
    };
    let Some(texel) = coordinate.texture_coords() else {
        return TRANSPARENT;
    };

    let base = texture.sample(texel);
    let normal = SphericalCoordinate::geographic(texel).surface_normal();
    let intensity = light_intensity(&normal, &sun_direction(sun));

    [
        base[0] * intensity,
        base[1] * intensity,
        base[2] * intensity,
        1.0,
    ]
}
