#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub(crate) position: [f32; 2],
    pub(crate) uv: [f32; 2],
}

impl QuadVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }

    /// Two triangles covering the surface in pixel space (top-left origin).
    /// V is flipped: the top edge carries v = 1 so that +y on the disk is north.
    pub fn surface_quad(width: f32, height: f32) -> [QuadVertex; 6] {
        let top_left = QuadVertex {
            position: [0.0, 0.0],
            uv: [0.0, 1.0],
        };
        let top_right = QuadVertex {
            position: [width, 0.0],
            uv: [1.0, 1.0],
        };
        let bottom_left = QuadVertex {
            position: [0.0, height],
            uv: [0.0, 0.0],
        };
        let bottom_right = QuadVertex {
            position: [width, height],
            uv: [1.0, 0.0],
        };

        [
            top_left,
            bottom_left,
            bottom_right,
            top_left,
            bottom_right,
            top_right,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_vertically_flipped() {
        let quad = QuadVertex::surface_quad(300.0, 270.0);
        for vertex in &quad {
            let expected_v = if vertex.position[1] == 0.0 { 1.0 } else { 0.0 };
            let expected_u = vertex.position[0] / 300.0;
            assert_eq!(vertex.uv, [expected_u, expected_v]);
        }
    }

    #[test]
    fn quad_covers_whole_surface() {
        let quad = QuadVertex::surface_quad(300.0, 270.0);
        let max_x = quad.iter().map(|v| v.position[0]).fold(0.0, f32::max);
        let max_y = quad.iter().map(|v| v.position[1]).fold(0.0, f32::max);
        assert_eq!((max_x, max_y), (300.0, 270.0));
        assert_eq!(size_of::<QuadVertex>(), 16);
    }
}
