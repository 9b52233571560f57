use crate::app::app::App;
use crate::error::{GlobeError, GlobeResult};
use crate::settings::Settings;
use crate::texture::DecodedTexture;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

pub struct AppHandler {
    pub app: Option<App>,
    pub settings: Settings,
    pub map: Option<DecodedTexture>,
    /// First fatal error; the event loop exits as soon as it is set.
    pub error: Option<GlobeError>,
}

impl AppHandler {
    pub fn new(settings: Settings, map: DecodedTexture) -> Self {
        Self {
            app: None,
            settings,
            map: Some(map),
            error: None,
        }
    }

    fn create_app(&self, event_loop: &ActiveEventLoop, map: &DecodedTexture) -> GlobeResult<App> {
        let window_settings = &self.settings.window;
        let window_attrs = Window::default_attributes()
            .with_title(window_settings.title.clone())
            .with_inner_size(PhysicalSize::new(window_settings.width, window_settings.height))
            .with_position(PhysicalPosition::new(window_settings.x, window_settings.y))
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        log::info!(
            "Created {}x{} window at ({}, {})",
            window_settings.width,
            window_settings.height,
            window_settings.x,
            window_settings.y
        );

        pollster::block_on(App::new(window, &self.settings, map))
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: GlobeError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        let Some(map) = self.map.take() else {
            return;
        };

        match self.create_app(event_loop, &map) {
            Ok(app) => self.app = Some(app),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if event_loop.exiting() {
            return;
        }
        let result = match &mut self.app {
            Some(app) => app.tick(),
            None => return,
        };
        if let Err(e) = result {
            self.fail(event_loop, e);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.take() {
            app.shutdown();
        }
    }
}
