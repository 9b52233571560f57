use clap::Parser;
use std::path::{Path, PathBuf};
use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod error;
mod projection;
mod renderer;
mod settings;
mod snapshot;
mod solar;
mod texture;

use settings::Settings;
use solar::Illumination;

pub const CONFY_APP_NAME: &str = "globe-widget";

#[derive(Parser, Debug)]
#[command(name = "globe-widget")]
#[command(about = "Desktop globe with live day and night shading")]
struct Cli {
    /// Equirectangular map, overrides the configured texture path
    texture: Option<PathBuf>,

    /// Render one frame to this PNG and exit without opening a window
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let texture_override = cli
        .texture
        .map(|path| path.to_string_lossy().into_owned());
    let settings = Settings::load().with_texture_path(texture_override);

    // Fail before any window exists if the map is unusable.
    let map = texture::load_from_file(Path::new(&settings.globe.texture_path))?;

    if let Some(output) = cli.snapshot {
        let sun = Illumination::now(settings.globe.utc_offset_hours);
        snapshot::write_snapshot(
            &output,
            &map,
            settings.window.width,
            settings.window.height,
            &sun,
        )?;
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = app::AppHandler::new(settings, map);
    event_loop.run_app(&mut handler)?;

    if let Some(e) = handler.error.take() {
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
