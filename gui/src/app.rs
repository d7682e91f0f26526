use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use shared::config::Config;
use shared::input::{Event, InputProcessor, Key, Response};
use shared::simulation::Simulation;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key as WinitKey, NamedKey};
use winit::window::{Window, WindowId};

use crate::frame::FrameBuilder;
use crate::renderer::Renderer;

/// Open the simulation window. Height comes first, as callers pass it.
pub fn create_window(event_loop: &ActiveEventLoop, height: u32, width: u32, title: &str) -> anyhow::Result<Window> {
    let attrs = Window::default_attributes()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(width, height));
    event_loop.create_window(attrs).context("failed to create window")
}

fn translate_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Named(NamedKey::ArrowUp) => Key::Up,
        WinitKey::Named(NamedKey::ArrowDown) => Key::Down,
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Key::Char(ch),
                _ => Key::Other,
            }
        }
        _ => Key::Other,
    }
}

struct Surface {
    window: Arc<Window>,
    renderer: Renderer,
}

/// Owns all state for the single-threaded polling loop: window events are
/// handled one at a time, and the idle hook checks whether a tick is due.
pub struct LifeApp {
    config: Config,
    surface: Option<Surface>,
    simulation: Simulation,
    input: InputProcessor,
    frame: FrameBuilder,
    last_cursor: [f64; 2],
    frame_count: u32,
    last_fps_log: Instant,
    startup_error: Option<anyhow::Error>,
}

impl LifeApp {
    pub fn new(config: Config) -> Self {
        let now = Instant::now();
        Self {
            simulation: Simulation::from_config(&config, now),
            input: InputProcessor::new(config.window_width, config.window_height),
            config,
            surface: None,
            frame: FrameBuilder::new(),
            last_cursor: [0.0, 0.0],
            frame_count: 0,
            last_fps_log: now,
            startup_error: None,
        }
    }

    pub fn take_startup_error(&mut self) -> Option<anyhow::Error> {
        self.startup_error.take()
    }

    fn open_surface(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Surface> {
        let window = create_window(
            event_loop,
            self.config.window_height,
            self.config.window_width,
            &self.config.title,
        )?;
        let window = Arc::new(window);
        let renderer = pollster::block_on(Renderer::new(window.clone())).context("failed to set up rendering")?;
        Ok(Surface { window, renderer })
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: Event) {
        match self.input.process(event, &mut self.simulation, Instant::now()) {
            Response::Redraw => self.request_redraw(),
            Response::Quit => event_loop.exit(),
            Response::Ignored => {}
        }
    }

    fn request_redraw(&self) {
        if let Some(surface) = &self.surface {
            surface.window.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let vertices = self.frame.build(
            self.simulation.grid(),
            self.simulation.status(),
            self.input.window_size(),
        );

        match surface.renderer.render(vertices) {
            Ok(()) => {
                self.frame_count += 1;
                let elapsed = self.last_fps_log.elapsed();
                if elapsed >= Duration::from_secs(1) {
                    let fps = self.frame_count as f64 / elapsed.as_secs_f64();
                    log::info!("fps: {:.1}", fps);
                    self.frame_count = 0;
                    self.last_fps_log = Instant::now();
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, exiting");
                event_loop.exit();
            }
            Err(err) => {
                log::warn!("dropped frame: {err}");
                let size = surface.renderer.size();
                surface.renderer.resize(size);
            }
        }
    }
}

impl ApplicationHandler<()> for LifeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        match self.open_surface(event_loop) {
            Ok(surface) => {
                let size = surface.window.inner_size();
                self.surface = Some(surface);
                self.dispatch(
                    event_loop,
                    Event::Resized {
                        width: size.width,
                        height: size.height,
                    },
                );
            }
            Err(err) => {
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.surface.as_ref().map(|surface| surface.window.id()) != Some(window_id) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.renderer.resize(size);
                }
                self.dispatch(
                    event_loop,
                    Event::Resized {
                        width: size.width,
                        height: size.height,
                    },
                );
            }
            WindowEvent::Occluded(false) => {
                let Some(size) = self.surface.as_ref().map(|surface| surface.window.inner_size()) else {
                    return;
                };
                self.dispatch(
                    event_loop,
                    Event::Exposed {
                        width: size.width,
                        height: size.height,
                    },
                );
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.last_cursor = [position.x, position.y];
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let [x, y] = self.last_cursor;
                self.dispatch(event_loop, Event::ButtonPress { x, y });
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    let key = translate_key(&event.logical_key);
                    self.dispatch(event_loop, Event::KeyPress(key));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.simulation.poll(Instant::now()) {
            self.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }
}
