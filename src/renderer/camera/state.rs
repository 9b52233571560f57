/// Globe orientation in radians.
///
/// Yaw accumulates without bound; the shading model wraps it when it builds a
/// longitude. Pitch has no input binding and stays at zero, but it is still
/// uploaded and honoured by the shader.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlobeRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl GlobeRotation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn as_array(&self) -> [f32; 2] {
        [self.yaw, self.pitch]
    }
}

/// Everything the interaction controller mutates: rotation, zoom and the
/// screen position of the host window.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub rotation: GlobeRotation,
    pub zoom: f32,
    pub window_position: [i32; 2],
}

impl CameraState {
    pub fn new(window_position: [i32; 2]) -> Self {
        Self {
            rotation: GlobeRotation::default(),
            zoom: 1.0,
            window_position,
        }
    }

    pub fn rotate_yaw(&mut self, delta: f32) {
        self.rotation.yaw += delta;
    }

    /// Adds `delta` and clamps into `[min, max]`.
    pub fn zoom_by(&mut self, delta: f32, min: f32, max: f32) {
        self.zoom = (self.zoom + delta).clamp(min, max);
    }

    pub fn move_window(&mut self, dx: i32, dy: i32) {
        self.window_position[0] += dx;
        self.window_position[1] += dy;
    }

    /// 2D camera for the visible pass: pixel space with a top-left origin, zoomed
    /// about the surface centre. Zoom lives here, never in the quad's UVs.
    pub fn view_projection(&self, width: f32, height: f32) -> nalgebra_glm::Mat4 {
        let center = nalgebra_glm::vec3(width * 0.5, height * 0.5, 0.0);
        let proj = nalgebra_glm::ortho(0.0, width, height, 0.0, -1.0, 1.0);

        let view = nalgebra_glm::translation(&center)
            * nalgebra_glm::scaling(&nalgebra_glm::vec3(self.zoom, self.zoom, 1.0))
            * nalgebra_glm::translation(&-center);

        proj * view
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new([0, 0])
    }
}
