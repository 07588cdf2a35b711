use std::error::Error;
use std::time::Duration;

use engine::app::{AppConfig, AppContext, AppControl, GameApp, InputFrame, TouchStage, run_game};
use engine::graphics::Renderer2d;
use winit::dpi::PhysicalSize;
use winit::event::VirtualKeyCode;

use chronocards::catalog::EventRecord;
use chronocards::headful::{FeedbackSfx, TableShell, draw_table};
use chronocards::input::{DragEvent, Point, TouchEvent};
use chronocards::settings::{PlayerSettings, SettingsStore};
use chronocards::{Driver, Game, GameError, Phase, init_logging, load_configured_catalog};

/// Mouse state between frames; the driver only ever sees drag events.
#[derive(Debug, Default)]
struct MouseDrag {
    active: bool,
    over_timeline: bool,
}

struct HeadfulState {
    driver: Driver<TableShell>,
    mouse: MouseDrag,
}

struct ChronoApp {
    settings: PlayerSettings,
    catalog: Vec<EventRecord>,
    seed: u64,
}

fn log_ignored(result: Result<Phase, GameError>) {
    if let Err(err) = result {
        tracing::debug!("input ignored: {err}");
    }
}

impl HeadfulState {
    fn on_mouse(&mut self, input: &InputFrame) {
        let Some((x, y)) = input.mouse_pos else {
            if input.cursor_left && self.mouse.active && self.mouse.over_timeline {
                self.mouse.over_timeline = false;
                log_ignored(self.driver.drag_event(DragEvent::DragLeave));
            }
            if input.mouse_up && self.mouse.active {
                self.end_mouse_drag(None);
            }
            return;
        };
        let pos = Point::new(x, y);

        if input.mouse_down {
            self.on_press(pos);
        }

        if self.mouse.active {
            self.driver.shell_mut().set_drag_pos(Some(pos));
            let over = self.driver.shell().layout().timeline.contains_f(pos.x, pos.y);
            if over {
                log_ignored(self.driver.drag_event(DragEvent::DragOver(pos)));
            } else if self.mouse.over_timeline {
                log_ignored(self.driver.drag_event(DragEvent::DragLeave));
            }
            self.mouse.over_timeline = over;

            if input.mouse_up {
                self.end_mouse_drag(Some(pos));
            }
        }
    }

    /// Restarts the round and forgets any mouse drag in flight.
    fn restart(&mut self) {
        log_ignored(self.driver.restart());
        self.mouse = MouseDrag::default();
        self.driver.shell_mut().set_drag_pos(None);
    }

    fn on_press(&mut self, pos: Point) {
        if self.driver.phase().is_terminal() {
            self.restart();
            return;
        }
        let shell = self.driver.shell();
        if shell.hits_hand(pos) {
            self.mouse = MouseDrag {
                active: true,
                over_timeline: false,
            };
            log_ignored(self.driver.drag_event(DragEvent::DragStart));
        } else if shell.hits_main_button(pos) {
            log_ignored(self.driver.draw());
        } else {
            self.driver.shell_mut().flip_at(pos);
        }
    }

    fn end_mouse_drag(&mut self, pos: Option<Point>) {
        if let (Some(pos), true) = (pos, self.mouse.over_timeline) {
            log_ignored(self.driver.drag_event(DragEvent::Drop(pos)));
        }
        log_ignored(self.driver.drag_event(DragEvent::DragEnd));
        self.driver.shell_mut().set_drag_pos(None);
        self.mouse = MouseDrag::default();
    }

    fn on_touches(&mut self, input: &InputFrame) {
        for touch in &input.touches {
            let pos = Point::new(touch.pos.0, touch.pos.1);
            let event = match touch.stage {
                TouchStage::Started => {
                    if self.driver.phase().is_terminal() {
                        self.restart();
                        continue;
                    }
                    if self.driver.shell().hits_main_button(pos) {
                        log_ignored(self.driver.draw());
                        continue;
                    }
                    if !self.driver.shell().hits_hand(pos) {
                        self.driver.shell_mut().flip_at(pos);
                        continue;
                    }
                    TouchEvent::Start { id: touch.id, pos }
                }
                TouchStage::Moved => TouchEvent::Move { id: touch.id, pos },
                TouchStage::Ended => TouchEvent::End { id: touch.id, pos },
                TouchStage::Cancelled => TouchEvent::Cancel { id: touch.id, pos },
            };
            log_ignored(self.driver.touch_event(event));
            let drag_pos = self.driver.phase().is_dragging().then_some(pos);
            self.driver.shell_mut().set_drag_pos(drag_pos);
        }
    }

    fn on_keys(&mut self, input: &InputFrame) -> AppControl {
        if input.key_pressed(VirtualKeyCode::Space) || input.key_pressed(VirtualKeyCode::Return) {
            log_ignored(self.driver.draw());
        }
        if input.key_pressed(VirtualKeyCode::R) {
            self.restart();
        }
        if input.key_pressed(VirtualKeyCode::Escape) && self.driver.request_exit() {
            return AppControl::Exit;
        }
        AppControl::Continue
    }
}

impl GameApp for ChronoApp {
    type State = HeadfulState;

    fn init_state(&mut self, ctx: &mut AppContext) -> Result<Self::State, Box<dyn Error>> {
        let sfx = match FeedbackSfx::new(self.settings.audio) {
            Ok(sfx) => Some(sfx),
            Err(err) => {
                tracing::warn!("audio unavailable, feedback tones disabled: {err}");
                None
            }
        };
        let shell = TableShell::new(
            ctx.surface_size,
            self.settings.presentation.autoscroll_edge_px as f32,
            sfx,
        );
        let game = Game::new(&self.catalog, self.settings.rules, self.seed)?;
        let driver = Driver::mount(game, shell, self.settings.presentation)?;
        Ok(HeadfulState {
            driver,
            mouse: MouseDrag::default(),
        })
    }

    fn update(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    ) -> AppControl {
        state.driver.shell_mut().resize(ctx.surface_size);
        if state.on_keys(input) == AppControl::Exit {
            return AppControl::Exit;
        }
        state.on_mouse(input);
        state.on_touches(input);
        state.driver.tick(dt);
        state.driver.shell_mut().advance(dt);
        AppControl::Continue
    }

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d) {
        draw_table(renderer, state.driver.shell());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let settings = SettingsStore::from_env().load();
    let catalog = load_configured_catalog(&settings)?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, events = catalog.len(), "starting windowed game");

    let config = AppConfig {
        title: "Chronocards".to_string(),
        desired_size: PhysicalSize::new(1024, 640),
        min_size: PhysicalSize::new(480, 400),
    };
    run_game(
        config,
        ChronoApp {
            settings,
            catalog,
            seed,
        },
    )
}
