use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

fn load_or_default<T: Serialize + DeserializeOwned + Default>(name: &str) -> T {
    match confy::load(CONFY_APP_NAME, name) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load '{}' settings, using defaults: {}", name, e);
            T::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Earth Widget".to_string(),
            width: 300,
            height: 270,
            x: 100,
            y: 100,
        }
    }
}

impl WindowSettings {
    pub fn load() -> Self {
        load_or_default("window")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeSettings {
    pub texture_path: String,
    /// Subtracted from the UTC hour before computing the hour angle.
    pub utc_offset_hours: f64,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self {
            texture_path: "map.png".to_string(),
            utc_offset_hours: 1.0,
        }
    }
}

impl GlobeSettings {
    pub fn load() -> Self {
        load_or_default("globe")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlSettings {
    pub rotate_sensitivity: f32,
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.01,
            zoom_step: 0.02,
            min_zoom: 1.0,
            max_zoom: 5.0,
        }
    }
}

impl ControlSettings {
    pub fn load() -> Self {
        let settings: Self = load_or_default("controls");
        if settings.min_zoom > settings.max_zoom {
            log::warn!(
                "Zoom range [{}, {}] is inverted, using defaults",
                settings.min_zoom,
                settings.max_zoom
            );
            return Self::default();
        }
        settings
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub window: WindowSettings,
    pub globe: GlobeSettings,
    pub controls: ControlSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            window: WindowSettings::load(),
            globe: GlobeSettings::load(),
            controls: ControlSettings::load(),
        }
    }

    /// Command line texture path wins over the configured one.
    pub fn with_texture_path(mut self, path: Option<String>) -> Self {
        if let Some(path) = path {
            self.globe.texture_path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_layout() {
        let settings = Settings::default();
        assert_eq!(settings.window.width, 300);
        assert_eq!(settings.window.height, 270);
        assert_eq!((settings.window.x, settings.window.y), (100, 100));
        assert_eq!(settings.globe.texture_path, "map.png");
        assert_eq!(settings.globe.utc_offset_hours, 1.0);
        assert_eq!(settings.controls.rotate_sensitivity, 0.01);
        assert_eq!(settings.controls.zoom_step, 0.02);
        assert_eq!((settings.controls.min_zoom, settings.controls.max_zoom), (1.0, 5.0));
    }

    #[test]
    fn command_line_texture_overrides_config() {
        let settings = Settings::default().with_texture_path(Some("earth.jpg".to_string()));
        assert_eq!(settings.globe.texture_path, "earth.jpg");

        let settings = Settings::default().with_texture_path(None);
        assert_eq!(settings.globe.texture_path, "map.png");
    }
}
