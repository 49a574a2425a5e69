use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use glam::Vec2;
use log::{debug, info, warn};
use pollster::block_on;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::camera::{Camera, Projection};
use crate::config::DemoConfig;
use crate::input::{Action, InputState, Key, MouseLook};
use crate::render::Renderer;
use crate::scene::Scene;
use crate::ui::{settings_panel, Overlay};

/// Scroll distance treated as one wheel click for touchpads.
const PIXELS_PER_SCROLL_LINE: f32 = 50.0;

/// Raised when no window can be opened, typically because no display is
/// available. Callers may fall back to headless output.
#[derive(Debug, Error)]
pub enum WindowInitError {
    #[error("failed to initialize event loop: {0}")]
    EventLoop(String),
    #[error("failed to create window: {0}")]
    Window(String),
}

/// Opens the demo window and runs the frame loop until it is closed.
pub fn run_interactive(config: DemoConfig) -> Result<()> {
    let event_loop = create_event_loop()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn create_event_loop() -> Result<EventLoop<()>, WindowInitError> {
    // Some platforms panic instead of returning an error when no display exists.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let event_loop = panic::catch_unwind(AssertUnwindSafe(EventLoop::new));
    panic::set_hook(default_hook);
    match event_loop {
        Ok(Ok(event_loop)) => Ok(event_loop),
        Ok(Err(err)) => Err(WindowInitError::EventLoop(err.to_string())),
        Err(panic) => Err(WindowInitError::EventLoop(panic_message(panic))),
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "unknown panic".into(),
        },
    }
}

struct Graphics {
    renderer: Renderer,
    overlay: Overlay,
}

/// Window, camera and scene state driven by winit events.
pub struct App {
    config: DemoConfig,
    scene: Scene,
    camera: Camera,
    input: InputState,
    mouse: MouseLook,
    graphics: Option<Graphics>,
    started: Instant,
    last_frame: Instant,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: DemoConfig) -> Self {
        let camera = config.camera.build(config.window.aspect_ratio());
        let scene = Scene::new(config.lighting.clone());
        let now = Instant::now();
        Self {
            config,
            scene,
            camera,
            input: InputState::new(),
            mouse: MouseLook::captured(),
            graphics: None,
            started: now,
            last_frame: now,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        debug!("stopping event loop: {err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let window = &self.config.window;
        let attributes = Window::default_attributes()
            .with_title(window.title.clone())
            .with_inner_size(LogicalSize::new(window.width, window.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|err| WindowInitError::Window(err.to_string()))?,
        );
        let renderer = block_on(Renderer::new(Arc::clone(&window)))
            .context("failed to initialize renderer")?;
        let overlay = Overlay::new(&window, renderer.max_texture_side());
        Ok(Graphics { renderer, overlay })
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        match action {
            Action::Quit => event_loop.exit(),
            Action::UsePerspective => self.set_projection(Projection::Perspective),
            Action::UseOrthographic => self.set_projection(Projection::Orthographic),
            Action::TogglePoints => {
                let settings = &mut self.scene.settings;
                settings.draw_as_points = !settings.draw_as_points;
                debug!("draw as points: {}", settings.draw_as_points);
            }
            Action::ResetCamera => {
                self.camera.reset();
                self.mouse.reset();
                debug!("camera reset");
            }
        }
    }

    fn set_projection(&mut self, projection: Projection) {
        if self.camera.projection() != projection {
            self.camera.set_projection(projection);
            debug!("switched to {} projection", projection.name());
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.renderer.resize(size);
        }
        if size.width > 0 && size.height > 0 {
            self.camera
                .set_aspect_ratio(size.width as f32 / size.height as f32);
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent, consumed: bool) {
        let Some(key) = Key::from_physical(event.physical_key) else {
            return;
        };
        if let Some(action) = self.key_input(key, event.state, consumed) {
            self.apply(event_loop, action);
        }
    }

    /// Tracks held keys. Presses the overlay consumed are dropped but
    /// releases always go through so no key stays held.
    fn key_input(&mut self, key: Key, state: ElementState, consumed: bool) -> Option<Action> {
        match state {
            ElementState::Pressed if !consumed => self.input.press(key),
            ElementState::Pressed => None,
            ElementState::Released => {
                self.input.release(key);
                None
            }
        }
    }

    fn toggle_cursor_lock(&mut self) {
        let locked = self.mouse.toggle_lock();
        self.apply_cursor_grab(locked);
    }

    fn apply_cursor_grab(&self, locked: bool) {
        let Some(graphics) = self.graphics.as_ref() else {
            return;
        };
        let window = graphics.renderer.window();
        if locked {
            let grab = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
            if let Err(err) = grab {
                warn!("cursor grab unavailable: {err}");
            }
        } else if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
            warn!("failed to release cursor: {err}");
        }
        window.set_cursor_visible(!locked);
        debug!("mouse look {}", if locked { "enabled" } else { "disabled" });
    }

    fn advance(&mut self, dt: f32, time: f32) {
        let axes = self.input.move_axes();
        if !axes.is_idle() {
            self.camera.fly(axes.forward, axes.right, axes.up, dt);
        }
        self.scene.update(time);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        let time = now.duration_since(self.started).as_secs_f32();
        self.last_frame = now;
        self.advance(dt, time);

        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };
        let settings = &mut self.scene.settings;
        let camera = &mut self.camera;
        let overlay_frame = graphics
            .overlay
            .run(graphics.renderer.window(), |ctx| settings_panel(ctx, settings, camera));

        let frame = self.scene.frame(&self.camera);
        if let Err(err) = graphics.renderer.render(&frame, &overlay_frame) {
            match err {
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                    let size = graphics.renderer.window().inner_size();
                    graphics.renderer.resize(size);
                }
                wgpu::SurfaceError::OutOfMemory => {
                    self.fail(event_loop, anyhow!("GPU is out of memory"));
                }
                wgpu::SurfaceError::Timeout => {
                    info!("Surface timeout; retrying next frame");
                }
                other => {
                    warn!("Surface error {other:?}; retrying next frame");
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.create_graphics(event_loop) {
            Ok(graphics) => {
                let size = graphics.renderer.size();
                self.graphics = Some(graphics);
                self.resize(size);
                self.apply_cursor_grab(self.mouse.is_locked());
                info!("window ready at {}x{}", size.width, size.height);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };
        if graphics.renderer.window_id() != window_id {
            return;
        }
        let consumed = graphics
            .overlay
            .on_window_event(graphics.renderer.window(), &event);
        let wants_pointer = graphics.overlay.wants_pointer();
        let keyboard_taken = consumed || graphics.overlay.wants_keyboard();

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::Focused(false) => self.input.clear(),
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event, keyboard_taken);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Right,
                ..
            } if !wants_pointer => self.toggle_cursor_lock(),
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                if let Some(delta) = self.mouse.motion(position) {
                    self.camera
                        .look(delta.x, delta.y, self.config.camera.mouse_sensitivity);
                }
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => {
                        position.y as f32 / PIXELS_PER_SCROLL_LINE
                    }
                };
                self.camera.zoom(scroll);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = self.graphics.as_ref() {
            graphics.renderer.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!("shutting down");
    }
}
