//! WebGPU rendering module
//!
//! Everything is drawn as flat-colored triangles in play-field space; the
//! browser surface adds a DOM overlay for text.

pub mod pipeline;
pub mod shapes;
#[cfg(target_arch = "wasm32")]
pub mod surface;
pub mod vertex;

pub use pipeline::RenderState;
#[cfg(target_arch = "wasm32")]
pub use surface::WebSurface;
