use crate::error::{GlobeError, GlobeResult};
use crate::renderer::Renderer;
use crate::renderer::camera::{CameraController, CameraState};
use crate::settings::Settings;
use crate::solar::Illumination;
use crate::texture::DecodedTexture;
use std::sync::Arc;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey, PhysicalKey};
use winit::window::Window;

pub struct EventResponse {
    pub exit: bool,
}

pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    camera_controller: CameraController,
    utc_offset_hours: f64,
}

impl App {
    pub async fn new(window: Arc<Window>, settings: &Settings, map: &DecodedTexture) -> GlobeResult<Self> {
        let renderer = Renderer::new(window.clone(), map).await?;

        let camera_state = CameraState::new([settings.window.x, settings.window.y]);
        let camera_controller = CameraController::new(camera_state, settings.controls);

        Ok(Self {
            window,
            renderer,
            camera_controller,
            utc_offset_hours: settings.globe.utc_offset_hours,
        })
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        match event {
            WindowEvent::CloseRequested => {
                return EventResponse { exit: true };
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.logical_key == Key::Named(NamedKey::Escape) {
                    return EventResponse { exit: true };
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    self.camera_controller.on_key(code, pressed);
                }
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            WindowEvent::Moved(position) => {
                self.camera_controller
                    .on_window_moved([position.x, position.y]);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let is_pressed = *state == ElementState::Pressed;
                self.camera_controller.on_mouse_button(*button, is_pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.camera_controller
                    .on_cursor_moved((position.x, position.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.camera_controller.on_cursor_left();
            }
            _ => {}
        }

        EventResponse { exit: false }
    }

    /// One frame: input rules, then a render with freshly computed sun angles.
    pub fn tick(&mut self) -> GlobeResult<()> {
        if let Some([x, y]) = self.camera_controller.tick() {
            self.window
                .set_outer_position(PhysicalPosition::new(x, y));
        }

        let sun = Illumination::now(self.utc_offset_hours);
        match self.renderer.render(self.camera_controller.state(), &sun) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.renderer.reconfigure();
                Ok(())
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                Ok(())
            }
            Err(e) => Err(GlobeError::from(e)),
        }
    }

    /// Renderer resources first, the window last.
    pub fn shutdown(self) {
        self.renderer.teardown();
        log::info!("Closing window");
        drop(self.window);
    }
}
