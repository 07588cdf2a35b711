use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chronocards::catalog::builtin_catalog;
use chronocards::host::{Haptic, HostShell, RecordingShell};
use chronocards::input::{DragEvent, InputModality, Point, PointerEvent, TouchEvent};
use chronocards::machine::{DRAW_LABEL, Notice, PLACE_LABEL};
use chronocards::session::Scoreboard;
use chronocards::settings::{GameRules, PresentationSettings};
use chronocards::validator::validate;
use chronocards::{Command, Driver, EventRecord, Game, GameError, GameOutcome, Phase};

fn mount(shell: RecordingShell, seed: u64) -> Driver<RecordingShell> {
    let game = Game::new(&builtin_catalog(), GameRules::default(), seed).expect("valid catalog");
    Driver::mount(game, shell, PresentationSettings::default()).expect("shell mounts")
}

fn hand_year(driver: &Driver<RecordingShell>) -> i32 {
    driver
        .game()
        .session()
        .hand()
        .map(|c| c.year)
        .expect("card in hand")
}

/// First valid slot, or the first invalid one when `wrong` and one exists.
fn slot_for(driver: &Driver<RecordingShell>, wrong: bool) -> usize {
    let years = driver.shell().years();
    let year = hand_year(driver);
    (0..=years.len())
        .find(|&i| validate(&years, i, year) != wrong)
        .unwrap_or(0)
}

fn drag_to(driver: &mut Driver<RecordingShell>, slot: usize) {
    let pos = Point::new(driver.shell().slot_x(slot), 20.0);
    driver.drag_event(DragEvent::DragStart).expect("drag start");
    driver.drag_event(DragEvent::DragOver(pos)).expect("drag over");
    driver.drag_event(DragEvent::Drop(pos)).expect("drop");
    driver.drag_event(DragEvent::DragEnd).expect("drag end");
}

fn touch_to(driver: &mut Driver<RecordingShell>, slot: usize) {
    let pos = Point::new(driver.shell().slot_x(slot), 20.0);
    let start = Point::new(300.0, 400.0);
    driver
        .touch_event(TouchEvent::Start { id: 7, pos: start })
        .expect("touch start");
    driver
        .touch_event(TouchEvent::Move { id: 7, pos })
        .expect("touch move");
    driver
        .touch_event(TouchEvent::End { id: 7, pos })
        .expect("touch end");
}

#[test]
fn drag_and_touch_play_the_same_game() {
    let mut by_drag = mount(RecordingShell::default(), 99);
    let mut by_touch = mount(RecordingShell::default(), 99);

    let mut turn = 0;
    while !by_drag.phase().is_terminal() {
        if by_drag.phase() == Phase::Idle {
            by_drag.draw().expect("draw");
            by_touch.draw().expect("draw");
            continue;
        }
        turn += 1;
        let slot = slot_for(&by_drag, turn % 4 == 0);
        drag_to(&mut by_drag, slot);
        touch_to(&mut by_touch, slot);
        assert_eq!(by_drag.phase(), by_touch.phase());
        assert_eq!(
            by_drag.game().session().snapshot(),
            by_touch.game().session().snapshot()
        );
    }
    assert_eq!(by_drag.shell().years(), by_touch.shell().years());
    assert_eq!(by_drag.shell().game_end, by_touch.shell().game_end);
}

#[test]
fn touch_released_off_the_timeline_cancels() {
    let mut driver = mount(
        RecordingShell {
            timeline_top: 100.0,
            ..RecordingShell::default()
        },
        3,
    );
    driver.draw().expect("draw");
    let held = driver.game().session().hand().cloned();
    let lives = driver.game().session().lives();

    let off = Point::new(250.0, 40.0);
    driver
        .touch_event(TouchEvent::Start { id: 1, pos: off })
        .expect("start");
    let phase = driver
        .touch_event(TouchEvent::End { id: 1, pos: off })
        .expect("end");

    assert_eq!(phase, Phase::HandFull);
    assert_eq!(driver.game().session().hand().cloned(), held);
    assert_eq!(driver.game().session().lives(), lives);
    assert!(driver.shell().timeline.is_empty());
}

#[test]
fn hover_moves_the_indicator_without_touching_the_session() {
    let mut driver = mount(RecordingShell::default(), 5);
    driver.draw().expect("draw");
    let board: Option<Scoreboard> = driver.shell().score;
    driver
        .pointer(PointerEvent::Start {
            modality: InputModality::Drag,
        })
        .expect("begin");
    driver
        .pointer(PointerEvent::Move {
            modality: InputModality::Drag,
            pos: Point::new(300.0, 50.0),
        })
        .expect("hover");

    assert_eq!(driver.shell().indicator, Some(0));
    assert_eq!(driver.shell().score, board);
    assert!(driver.phase().is_dragging());

    driver
        .pointer(PointerEvent::Leave {
            modality: InputModality::Drag,
        })
        .expect("leave");
    assert_eq!(driver.shell().indicator, None);
}

fn hover_at_right_edge(driver: &mut Driver<RecordingShell>) {
    driver
        .pointer(PointerEvent::Start {
            modality: InputModality::Touch,
        })
        .expect("begin");
    driver
        .pointer(PointerEvent::Move {
            modality: InputModality::Touch,
            pos: Point::new(590.0, 50.0),
        })
        .expect("hover at edge");
    assert!(driver.is_autoscrolling());
}

#[test]
fn autoscroll_is_cancelled_on_every_way_out_of_a_drag() {
    let mut driver = mount(RecordingShell::default(), 8);
    driver.draw().expect("draw");

    hover_at_right_edge(&mut driver);
    driver
        .pointer(PointerEvent::Leave {
            modality: InputModality::Touch,
        })
        .expect("leave");
    assert!(!driver.is_autoscrolling());

    driver
        .pointer(PointerEvent::Move {
            modality: InputModality::Touch,
            pos: Point::new(590.0, 50.0),
        })
        .expect("back at edge");
    assert!(driver.is_autoscrolling());
    driver
        .pointer(PointerEvent::Move {
            modality: InputModality::Touch,
            pos: Point::new(300.0, 50.0),
        })
        .expect("away from edge");
    assert!(!driver.is_autoscrolling());
    driver.dispatch(Command::Cancel).expect("cancel");

    hover_at_right_edge(&mut driver);
    driver.dispatch(Command::Cancel).expect("cancel");
    assert!(!driver.is_autoscrolling());

    hover_at_right_edge(&mut driver);
    driver.dispatch(Command::Drop(0)).expect("drop");
    assert!(!driver.is_autoscrolling());

    driver.draw().expect("draw");
    hover_at_right_edge(&mut driver);
    driver.restart().expect("restart");
    assert!(!driver.is_autoscrolling());

    let scrolled = driver.shell().scrolled_px;
    driver.tick(Duration::from_secs(1));
    assert_eq!(driver.shell().scrolled_px, scrolled);
}

#[test]
fn drawing_twice_alerts_through_the_shell_without_a_platform() {
    let mut driver = mount(RecordingShell::default(), 1);
    driver.draw().expect("draw");
    let remaining = driver.game().session().deck().len();

    driver.draw().expect("second draw is a no-op");
    assert_eq!(driver.shell().alerts, vec![Notice::HandOccupied.message()]);
    assert_eq!(driver.game().session().deck().len(), remaining);
}

#[test]
fn platform_gets_buttons_haptics_and_alerts() {
    let mut driver = mount(RecordingShell::with_platform(), 12);
    let button = |d: &Driver<RecordingShell>| {
        d.shell()
            .platform
            .as_ref()
            .and_then(|p| p.main_button.clone())
    };
    assert_eq!(button(&driver).as_deref(), Some(DRAW_LABEL));

    driver.draw().expect("draw");
    assert_eq!(button(&driver).as_deref(), Some(PLACE_LABEL));

    let right = slot_for(&driver, false);
    drag_to(&mut driver, right);
    assert_eq!(button(&driver).as_deref(), Some(DRAW_LABEL));

    // Years are distinct, so one of the two slots around a single card is wrong.
    driver.draw().expect("draw");
    let wrong = slot_for(&driver, true);
    drag_to(&mut driver, wrong);
    assert_eq!(driver.game().session().lives(), 2);

    let platform = driver.shell().platform.clone().expect("platform attached");
    assert_eq!(platform.haptics, vec![Haptic::Success, Haptic::Error]);
    assert_eq!(platform.alerts, vec![Notice::Misplaced.message()]);
    assert!(driver.shell().alerts.is_empty());
}

#[test]
fn feedback_indicator_outlives_the_next_action() {
    let mut driver = mount(RecordingShell::default(), 21);
    driver.draw().expect("draw");
    drag_to(&mut driver, 0);
    assert_eq!(driver.shell().feedback, Some(true));

    driver.tick(Duration::from_millis(500));
    driver.draw().expect("drawing is not blocked by feedback");
    assert_eq!(driver.phase(), Phase::HandFull);
    assert_eq!(driver.shell().feedback, Some(true));

    driver.tick(Duration::from_millis(1_000));
    assert_eq!(driver.shell().feedback, None);
}

#[test]
fn invalid_transitions_change_nothing() {
    let mut driver = mount(RecordingShell::default(), 2);
    let before = driver.game().session().snapshot();

    for command in [Command::Drop(0), Command::Cancel, Command::Hover(Some(1))] {
        let err = driver.dispatch(command).expect_err("not valid while idle");
        assert!(err.is_invalid_transition());
    }
    assert_eq!(driver.phase(), Phase::Idle);
    assert_eq!(driver.game().session().snapshot(), before);
    assert!(driver.shell().alerts.is_empty());
}

#[test]
fn game_end_message_reaches_the_shell() {
    let catalog = vec![EventRecord::new("Only", 1000, "", "")];
    let game = Game::new(&catalog, GameRules::default(), 0).expect("valid");
    let mut driver =
        Driver::mount(game, RecordingShell::default(), PresentationSettings::default())
            .expect("mount");
    driver.draw().expect("draw");
    drag_to(&mut driver, 0);

    let (outcome, score, message) = driver.shell().game_end.clone().expect("game over shown");
    assert_eq!(outcome, GameOutcome::Won);
    assert_eq!(score, 10);
    assert!(message.contains("score of 10"));
}

/// A shell whose hand mount point is missing; alerts go to a shared log.
struct BrokenShell {
    alerts: Rc<RefCell<Vec<String>>>,
}

impl HostShell for BrokenShell {
    fn mount(&mut self) -> Result<(), GameError> {
        Err(GameError::MissingHostElement("current-card"))
    }

    fn render_hand(&mut self, _card: Option<&EventRecord>) {}
    fn render_timeline(&mut self, _events: &[EventRecord]) {}
    fn render_score(&mut self, _board: &Scoreboard) {}
    fn show_feedback(&mut self, _accepted: bool) {}
    fn show_game_end(&mut self, _outcome: GameOutcome, _score: u32, _message: &str) {}

    fn resolve_insertion_index(&self, _pointer_x: f32) -> usize {
        0
    }

    fn alert(&mut self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

#[test]
fn missing_mount_point_aborts_with_a_visible_notice() {
    let alerts = Rc::new(RefCell::new(Vec::new()));
    let game = Game::new(&builtin_catalog(), GameRules::default(), 0).expect("valid");
    let result = Driver::mount(
        game,
        BrokenShell {
            alerts: Rc::clone(&alerts),
        },
        PresentationSettings::default(),
    );

    assert!(matches!(
        result,
        Err(GameError::MissingHostElement("current-card"))
    ));
    assert_eq!(*alerts.borrow(), vec![Notice::InitFailed.message()]);
}

/// Implements only what a shell must; every optional hook keeps its default.
#[derive(Default)]
struct BareShell {
    timeline: Vec<EventRecord>,
}

impl HostShell for BareShell {
    fn render_hand(&mut self, _card: Option<&EventRecord>) {}

    fn render_timeline(&mut self, events: &[EventRecord]) {
        self.timeline = events.to_vec();
    }

    fn render_score(&mut self, _board: &Scoreboard) {}
    fn show_feedback(&mut self, _accepted: bool) {}
    fn show_game_end(&mut self, _outcome: GameOutcome, _score: u32, _message: &str) {}

    fn resolve_insertion_index(&self, _pointer_x: f32) -> usize {
        self.timeline.len()
    }
}

#[test]
fn shell_that_cannot_ask_never_grants_exit() {
    let game = Game::new(&builtin_catalog(), GameRules::default(), 0).expect("valid");
    let mut driver =
        Driver::mount(game, BareShell::default(), PresentationSettings::default()).expect("mount");
    assert!(!driver.request_exit());
    assert!(!driver.request_exit());
}

#[test]
fn drop_past_the_end_of_the_timeline_is_refused_without_cost() {
    let catalog = vec![
        EventRecord::new("First", 10, "", ""),
        EventRecord::new("Second", 20, "", ""),
    ];
    let game = Game::new(&catalog, GameRules::default(), 0).expect("valid");
    let mut driver =
        Driver::mount(game, RecordingShell::default(), PresentationSettings::default())
            .expect("mount");
    driver.draw().expect("draw");
    driver
        .dispatch(Command::BeginDrag(InputModality::Drag))
        .expect("begin drag");
    let before = driver.game().session().snapshot();

    let err = driver.dispatch(Command::Drop(99)).expect_err("slot 99 does not exist");
    assert!(matches!(
        err,
        GameError::SlotOutOfRange { index: 99, len: 0 }
    ));
    assert!(err.is_usage_error());
    assert_eq!(driver.game().session().lives(), 3);
    assert_eq!(driver.game().session().snapshot(), before);
    assert!(driver.phase().is_dragging());
    assert!(driver.shell().alerts.is_empty());
    assert_eq!(driver.shell().feedback, None);

    driver.dispatch(Command::Drop(0)).expect("empty timeline takes slot 0");
    assert_eq!(driver.phase(), Phase::Idle);
}
