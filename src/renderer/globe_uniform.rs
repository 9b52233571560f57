use crate::renderer::camera::CameraState;
use crate::solar::Illumination;
use bytemuck::{Pod, Zeroable};

/// Uniform block of the globe shader. Field order and padding must match
/// `GlobeUniform` in `globe.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GlobeUniform {
    pub mvp: [[f32; 4]; 4],
    pub rotation: [f32; 2],
    pub resolution: [f32; 2],
    pub sun_declination: f32,
    pub sun_hour_angle: f32,
    pub _padding: [f32; 2],
}

impl GlobeUniform {
    pub fn new(camera: &CameraState, resolution: [f32; 2], sun: &Illumination) -> Self {
        let mvp = camera.view_projection(resolution[0], resolution[1]);
        Self {
            mvp: mvp.into(),
            rotation: camera.rotation.as_array(),
            resolution,
            sun_declination: sun.declination as f32,
            sun_hour_angle: sun.hour_angle as f32,
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::GlobeRotation;

    #[test]
    fn layout_is_std140_sized() {
        assert_eq!(size_of::<GlobeUniform>(), 96);
        assert_eq!(size_of::<GlobeUniform>() % 16, 0);
    }

    #[test]
    fn carries_rotation_and_sun_angles() {
        let mut camera = CameraState::default();
        camera.rotation = GlobeRotation::new(-7.5, 0.0);
        let sun = Illumination {
            declination: 0.25,
            hour_angle: -1.5,
        };
        let uniform = GlobeUniform::new(&camera, [300.0, 270.0], &sun);
        assert_eq!(uniform.rotation, [-7.5, 0.0]);
        assert_eq!(uniform.resolution, [300.0, 270.0]);
        assert_eq!(uniform.sun_declination, 0.25);
        assert_eq!(uniform.sun_hour_angle, -1.5);
    }

    #[test]
    fn mvp_is_column_major() {
        let uniform = GlobeUniform::new(
            &CameraState::default(),
            [300.0, 270.0],
            &Illumination {
                declination: 0.0,
                hour_angle: 0.0,
            },
        );
        // Translation column of the pixel-space ortho projection.
        let translation = uniform.mvp[3];
        assert!((translation[0] + 1.0).abs() < 1e-6);
        assert!((translation[1] - 1.0).abs() < 1e-6);
        assert!((translation[3] - 1.0).abs() < 1e-6);
    }
}
