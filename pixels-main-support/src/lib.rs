#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! winit + pixels host for a [`PlaybackSession`].
//!
//! Controls: `Space`/`P` play or pause, arrow keys or `+`/`-` change speed,
//! `N` steps once while paused, left click toggles a cell, `Esc`/`Q`/`X` quit.
//! The window title is the text readout.

mod error;
mod frames;

pub use error::Error;

use error::log_error;
use frames::WindowFrames;
use life_universe::Universe;
use log::info;
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use playback::{Config, PlaybackSession, Readout, RgbaSurface, SurfaceRect};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Window, WindowId};

const WINDOW_SCALE: u32 = 2;
const BACKGROUND_COLOR: Color = Color::WHITE;

/// Opens a window showing the universe from `build_universe` and runs its
/// playback until the window closes. Playback starts immediately.
pub fn animate<U, F>(build_universe: F, config: Config) -> Result<(), Error>
where
    U: Universe,
    F: Fn() -> U,
{
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(build_universe, config);
    event_loop.run_app(&mut handler)?;
    match handler.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App<U: Universe> {
    session: PlaybackSession<U>,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    frames: WindowFrames,
    started: Instant,
    cursor: Option<PhysicalPosition<f64>>,
    last_readout: Option<Readout>,
}

impl<U: Universe> App<U> {
    fn new(event_loop: &ActiveEventLoop, universe: U, config: Config) -> Result<Self, Error> {
        let session = PlaybackSession::new(universe, config);
        let (width, height) = session.surface_size();
        let window = Arc::new(Self::build_window(event_loop, width, height)?);
        let pixels = Self::build_pixels(&window, width, height)?;
        Ok(Self {
            session,
            frames: WindowFrames::new(window.clone()),
            window,
            pixels,
            started: Instant::now(),
            cursor: None,
            last_readout: None,
        })
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        width: u32,
        height: u32,
    ) -> Result<Window, Error> {
        let window_attributes = Window::default_attributes()
            .with_title("Game of Life")
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_inner_size(PhysicalSize::new(width * WINDOW_SCALE, height * WINDOW_SCALE))
            .with_min_inner_size(PhysicalSize::new(width, height))
            .with_visible(false);
        Ok(event_loop.create_window(window_attributes)?)
    }

    fn build_pixels(window: &Arc<Window>, width: u32, height: u32) -> Result<Pixels<'static>, Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        Ok(PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()?)
    }

    fn on_create(&mut self) -> Result<(), Error> {
        self.paint(|session, surface| session.redraw(surface));
        self.pixels.render()?;
        self.window.set_visible(true);
        self.session.play(&mut self.frames);
        self.update_title();
        Ok(())
    }

    /// Runs `draw` against the pixel buffer.
    fn paint<F>(&mut self, draw: F)
    where
        F: FnOnce(&mut PlaybackSession<U>, &mut RgbaSurface<'_>),
    {
        let (width, height) = self.session.surface_size();
        let mut surface = RgbaSurface::new(self.pixels.frame_mut(), width, height);
        draw(&mut self.session, &mut surface);
    }

    fn on_redraw(&mut self) -> Result<(), Error> {
        if let Some(request) = self.frames.pending.take() {
            let now = self.started.elapsed();
            let (width, height) = self.session.surface_size();
            let mut surface = RgbaSurface::new(self.pixels.frame_mut(), width, height);
            self.session
                .on_frame(request, now, &mut self.frames, &mut surface);
        }
        self.pixels.render()?;
        Ok(())
    }

    fn on_timer_check(&mut self) {
        let Some(timer) = self.frames.timer.as_mut() else {
            return;
        };
        if let Some((handle, elapsed)) = timer.fire_if_due(Instant::now())
            && let Some(readout) = self.session.on_readout_timer(handle, elapsed)
        {
            self.last_readout = Some(readout);
            self.update_title();
        }
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), Error> {
        if size.width > 0 && size.height > 0 {
            self.pixels.resize_surface(size.width, size.height)?;
            self.window.request_redraw();
        }
        Ok(())
    }

    fn on_click(&mut self) -> Result<(), Error> {
        let Some(cursor) = self.cursor else {
            return Ok(());
        };
        let rect = displayed_rect(self.window.inner_size(), self.session.surface_size());
        if let Some(pos) = self.session.cell_at((cursor.x, cursor.y), rect) {
            self.paint(|session, surface| session.toggle_at(pos, surface));
            self.pixels.render()?;
        }
        Ok(())
    }

    fn on_key(&mut self, action: KeyAction) -> Result<(), Error> {
        match action {
            KeyAction::Quit => return Ok(()),
            KeyAction::TogglePlay => {
                self.session.toggle(&mut self.frames);
            }
            KeyAction::Faster => {
                self.session.faster();
            }
            KeyAction::Slower => {
                self.session.slower();
            }
            KeyAction::Step => {
                let mut stepped = false;
                self.paint(|session, surface| stepped = session.step_once(surface));
                if stepped {
                    self.pixels.render()?;
                }
            }
        }
        self.update_title();
        Ok(())
    }

    fn update_title(&self) {
        self.window
            .set_title(&status_line(&self.session, self.last_readout.as_ref()));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyAction {
    Quit,
    TogglePlay,
    Faster,
    Slower,
    Step,
}

/// Only the speed keys act on auto-repeat; holding any other key counts once.
fn key_action(code: KeyCode, repeat: bool) -> Option<KeyAction> {
    match code {
        KeyCode::ArrowUp | KeyCode::ArrowRight | KeyCode::Equal | KeyCode::NumpadAdd => {
            Some(KeyAction::Faster)
        }
        KeyCode::ArrowDown | KeyCode::ArrowLeft | KeyCode::Minus | KeyCode::NumpadSubtract => {
            Some(KeyAction::Slower)
        }
        _ if repeat => None,
        KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => Some(KeyAction::Quit),
        KeyCode::Space | KeyCode::KeyP => Some(KeyAction::TogglePlay),
        KeyCode::KeyN => Some(KeyAction::Step),
        _ => None,
    }
}

/// Text readout: play state, speed, generation, ticks per second and frame rate.
fn status_line<U: Universe>(session: &PlaybackSession<U>, readout: Option<&Readout>) -> String {
    let state = if session.is_running() {
        "Playing"
    } else {
        "Paused"
    };
    let mut line = format!(
        "Game of Life | {state} | speed {} | generation {}",
        session.speed().get(),
        session.generation()
    );
    if let Some(readout) = readout {
        line.push_str(&format!(" | {:.0} ticks/s", readout.ticks_per_second()));
    }
    if let Some(fps) = session.fps().stats() {
        line.push_str(&format!(
            " | {:.0} fps (mean {:.0}, min {:.0}, max {:.0})",
            fps.latest, fps.mean, fps.min, fps.max
        ));
    }
    line
}

/// Where pixels shows a `buffer`-sized frame inside a `window`-sized
/// surface: the largest whole-number scale that fits, centered.
fn displayed_rect(window: PhysicalSize<u32>, buffer: (u32, u32)) -> SurfaceRect {
    let (buffer_width, buffer_height) = (buffer.0 as f64, buffer.1 as f64);
    let width_ratio = (window.width as f64 / buffer_width).max(1.0);
    let height_ratio = (window.height as f64 / buffer_height).max(1.0);
    let scale = width_ratio.clamp(1.0, height_ratio).floor();
    let width = buffer_width * scale;
    let height = buffer_height * scale;
    SurfaceRect {
        left: (window.width as f64 - width) / 2.0,
        top: (window.height as f64 - height) / 2.0,
        width,
        height,
    }
}

struct AppEventHandler<U, F>
where
    U: Universe,
    F: Fn() -> U,
{
    build_universe: F,
    config: Config,
    app: Option<App<U>>,
    failure: Option<Error>,
}

impl<U, F> AppEventHandler<U, F>
where
    U: Universe,
    F: Fn() -> U,
{
    fn new(build_universe: F, config: Config) -> Self {
        Self {
            build_universe,
            config,
            app: None,
            failure: None,
        }
    }

    fn app(&mut self) -> &mut App<U> {
        self.app
            .as_mut()
            .expect("window event delivered before the playback session was created")
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, method_name: &str, err: Error) {
        log_error(method_name, &err);
        self.failure.get_or_insert(err);
        event_loop.exit();
    }
}

impl<U, F> ApplicationHandler for AppEventHandler<U, F>
where
    U: Universe,
    F: Fn() -> U,
{
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if matches!(cause, StartCause::Init) {
            return;
        }
        if let Some(app) = self.app.as_mut() {
            app.on_timer_check();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        let universe = (self.build_universe)();
        info!("universe {}x{}", universe.width(), universe.height());
        let created = App::new(event_loop, universe, self.config.clone()).and_then(|mut app| {
            app.on_create()?;
            Ok(app)
        });
        match created {
            Ok(app) => self.app = Some(app),
            Err(err) => self.fail(event_loop, "resumed", err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let result = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                Ok(())
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat,
                        ..
                    },
                ..
            } => match key_action(code, repeat) {
                Some(KeyAction::Quit) => {
                    event_loop.exit();
                    Ok(())
                }
                Some(action) => self.app().on_key(action),
                None => Ok(()),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.app().cursor = Some(position);
                Ok(())
            }
            WindowEvent::CursorLeft { .. } => {
                self.app().cursor = None;
                Ok(())
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.app().on_click(),
            WindowEvent::Resized(size) => self.app().on_resize(size),
            WindowEvent::RedrawRequested => self.app().on_redraw(),
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.fail(event_loop, "window_event", err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let wakeup = self
            .app
            .as_ref()
            .and_then(|app| app.frames.timer)
            .map(|timer| timer.deadline);
        match wakeup {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
