//! Real-time Phong lighting demo built on wgpu.
//!
//! The matrix helpers, camera, lights and scene description are plain value
//! types with no GPU dependency, so they can be driven and inspected from
//! tests or from the headless summary. Only [`render`], [`ui`] and [`app`]
//! touch the window and the GPU.

pub mod app;
pub mod camera;
pub mod config;
pub mod input;
pub mod light;
pub mod math;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod summary;
pub mod transform;
pub mod ui;

pub use app::{run_interactive, App, WindowInitError};
pub use camera::{Camera, Projection};
pub use config::{CameraConfig, DemoConfig, WindowConfig};
pub use input::{Action, InputState, Key, MouseLook};
pub use light::{Attenuation, DirectionalLight, Light, LightChannel, Material, PointLight, SpotLight};
pub use math::Axis;
pub use render::Renderer;
pub use scene::{FrameState, LightingSettings, Orbit, Scene};
pub use shapes::MeshData;
pub use summary::write_summary;
pub use transform::{ProjectionMatrices, Transform};
