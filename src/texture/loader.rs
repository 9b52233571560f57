use crate::error::{GlobeError, GlobeResult};
use std::path::Path;

/// An equirectangular map decoded to tightly packed RGBA8.
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    pub rgba: image::RgbaImage,
    pub width: u32,
    pub height: u32,
}

/// Load a texture from a local file
pub fn load_from_file(path: &Path) -> GlobeResult<DecodedTexture> {
    let display = path.display().to_string();
    let data = std::fs::read(path).map_err(|source| GlobeError::TextureIo {
        path: display.clone(),
        source,
    })?;
    decode_texture(&data, &display)
}

/// Decode any format the `image` crate knows (PNG and JPEG maps are typical)
pub fn decode_texture(data: &[u8], name: &str) -> GlobeResult<DecodedTexture> {
    let img = image::load_from_memory(data).map_err(|source| GlobeError::TextureDecode {
        path: name.to_string(),
        source,
    })?;

    let width = img.width();
    let height = img.height();
    if width == 0 || height == 0 {
        return Err(GlobeError::TextureSize {
            path: name.to_string(),
            width,
            height,
        });
    }

    log::info!("Decoded texture '{}' ({}x{})", name, width, height);

    Ok(DecodedTexture {
        rgba: img.to_rgba8(),
        width,
        height,
    })
}
