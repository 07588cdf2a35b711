use std::collections::HashSet;
use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{
    ElementState, Event, KeyboardInput, MouseButton, TouchPhase, VirtualKeyCode, WindowEvent,
};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::SurfaceSize;

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub min_size: PhysicalSize<u32>,
}

pub struct AppContext {
    pub window: Window,
    pub surface_size: SurfaceSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchStage {
    Started,
    Moved,
    Ended,
    Cancelled,
}

impl From<TouchPhase> for TouchStage {
    fn from(phase: TouchPhase) -> Self {
        match phase {
            TouchPhase::Started => TouchStage::Started,
            TouchPhase::Moved => TouchStage::Moved,
            TouchPhase::Ended => TouchStage::Ended,
            TouchPhase::Cancelled => TouchStage::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub id: u64,
    pub stage: TouchStage,
    pub pos: (f32, f32),
}

/// Everything the window reported since the previous frame.
///
/// `mouse_down` / `mouse_up` / `cursor_left` / `touches` / `keys_pressed` are edge-triggered
/// and cleared after each frame; `mouse_pos` and `mouse_held` persist.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub mouse_pos: Option<(f32, f32)>,
    pub mouse_down: bool,
    pub mouse_up: bool,
    pub mouse_held: bool,
    pub cursor_left: bool,
    pub touches: Vec<TouchSample>,
    pub keys_pressed: HashSet<VirtualKeyCode>,
}

impl InputFrame {
    pub fn end_frame(&mut self) {
        self.mouse_down = false;
        self.mouse_up = false;
        self.cursor_left = false;
        self.touches.clear();
        self.keys_pressed.clear();
    }

    pub fn key_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    fn apply(&mut self, event: &WindowEvent<'_>) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_pos = Some((position.x.max(0.0) as f32, position.y.max(0.0) as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor_left = true;
                self.mouse_pos = None;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.mouse_down = true;
                    self.mouse_held = true;
                }
                ElementState::Released => {
                    self.mouse_up = true;
                    self.mouse_held = false;
                }
            },
            WindowEvent::Touch(touch) => self.touches.push(TouchSample {
                id: touch.id,
                stage: touch.phase.into(),
                pos: (touch.location.x as f32, touch.location.y as f32),
            }),
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(key),
                        ..
                    },
                ..
            } => {
                self.keys_pressed.insert(*key);
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Exit,
}

pub trait GameApp {
    type State;

    /// Builds the first state once the window exists. An error aborts `run_game`.
    fn init_state(&mut self, ctx: &mut AppContext) -> Result<Self::State, Box<dyn Error>>;

    fn update(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    ) -> AppControl;

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d);

    fn on_close_requested(&mut self, _state: &mut Self::State) -> AppControl {
        AppControl::Exit
    }
}

/// Opens a window and drives `game` with a CPU-rendered `pixels` frame buffer.
pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(config.desired_size)
        .with_min_inner_size(config.min_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width.max(1), window_size.height.max(1));
    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let mut pixels = Pixels::new(surface_size.width, surface_size.height, surface_texture)?;

    let mut ctx = AppContext {
        window,
        surface_size,
    };
    let mut state = game.init_state(&mut ctx)?;
    let mut input = InputFrame::default();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    if game.on_close_requested(&mut state) == AppControl::Exit {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                WindowEvent::Resized(size) => {
                    if size.width == 0 || size.height == 0 {
                        return;
                    }
                    ctx.surface_size = SurfaceSize::new(size.width, size.height);
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        tracing::warn!("surface resize failed: {err}");
                    }
                    if let Err(err) = pixels.resize_buffer(size.width, size.height) {
                        tracing::warn!("buffer resize failed: {err}");
                    }
                    ctx.window.request_redraw();
                }
                other => input.apply(other),
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                if game.update(&mut state, &input, dt, &mut ctx) == AppControl::Exit {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                input.end_frame();

                let size = ctx.surface_size;
                let mut renderer = CpuRenderer::new(pixels.frame_mut(), size);
                renderer.begin_frame(size);
                game.render(&state, &mut renderer);
                if let Err(err) = pixels.render() {
                    tracing::warn!("present failed: {err}");
                }
            }
            Event::MainEventsCleared => {
                ctx.window.request_redraw();
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}
