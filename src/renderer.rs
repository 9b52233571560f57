pub mod camera;
mod globe_uniform;
mod quad_vertex;
mod render;
mod renderer;
mod resources;

pub use renderer::Renderer;
