pub mod common;
mod native;
pub(crate) mod shared;

pub use common::{present_frame, FrameTarget, GlobalUniform, LightUniform, ObjectConstants, OPENGL_TO_WGPU};
pub use native::Renderer;
