use crate::renderer::camera::CameraState;
use crate::renderer::globe_uniform::GlobeUniform;
use crate::renderer::renderer::Renderer;
use crate::solar::Illumination;

impl Renderer {
    /// One frame: uniforms, offscreen composite, globe pass, present.
    pub fn render(
        &mut self,
        camera: &CameraState,
        sun: &Illumination,
    ) -> Result<(), wgpu::SurfaceError> {
        // Skip rendering if window size is invalid (minimized, not ready, etc.)
        if self.config.width == 0 || self.config.height == 0 {
            return Ok(());
        }

        // Uploaded every frame, changed or not.
        let uniform = GlobeUniform::new(camera, self.resolution, sun);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Globe Encoder"),
            });

        {
            let mut offscreen_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Offscreen Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.resources.offscreen.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            offscreen_pass.set_pipeline(&self.blit_pipeline);
            offscreen_pass.set_bind_group(0, &self.resources.source.bind_group, &[]);
            offscreen_pass.draw(0..3, 0..1);
        }

        {
            let mut globe_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Globe Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            globe_pass.set_pipeline(&self.globe_pipeline);
            globe_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            globe_pass.set_bind_group(1, &self.resources.offscreen.bind_group, &[]);
            globe_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            globe_pass.draw(0..6, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
