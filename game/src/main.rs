//! Headless autoplay: deals a game, plays it with a slightly clumsy bot through the same
//! drag events a window would send, and prints the final session as JSON. The bot's moves
//! are then replayed through `HeadlessRunner` to check the game is deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use engine::HeadlessRunner;

use chronocards::host::RecordingShell;
use chronocards::input::{DragEvent, InputModality, Point};
use chronocards::logic::TimelineLogic;
use chronocards::settings::SettingsStore;
use chronocards::validator::validate;
use chronocards::{Command, Driver, Game, Phase, init_logging, load_configured_catalog};

/// Chance that the bot picks a wrong slot when one exists.
const MISTAKE_RATE: f64 = 0.2;

fn choose_slot(years: &[i32], year: i32, rng: &mut StdRng) -> usize {
    let (good, bad): (Vec<usize>, Vec<usize>) =
        (0..=years.len()).partition(|&i| validate(years, i, year));
    if !bad.is_empty() && rng.random_bool(MISTAKE_RATE) {
        return bad[rng.random_range(0..bad.len())];
    }
    good.first().copied().unwrap_or(years.len())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let store = SettingsStore::from_env();
    let settings = store.load();
    let catalog = load_configured_catalog(&settings)?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, settings = %store.path().display(), "autoplay starting");

    let logic = TimelineLogic::new(&catalog, settings.rules, seed)?;
    let game = Game::new(&catalog, settings.rules, seed)?;
    let mut driver = Driver::mount(game, RecordingShell::default(), settings.presentation)?;
    let mut rng = StdRng::seed_from_u64(seed.rotate_left(17));
    let mut moves = Vec::new();

    loop {
        match driver.phase() {
            Phase::Terminal(outcome) => {
                tracing::info!(?outcome, "autoplay finished");
                break;
            }
            Phase::Idle => {
                driver.draw()?;
                moves.push(Command::Draw);
            }
            Phase::HandFull => {
                let year = driver
                    .game()
                    .session()
                    .hand()
                    .map(|card| card.year)
                    .unwrap_or_default();
                let slot = choose_slot(&driver.shell().years(), year, &mut rng);
                let pos = Point::new(driver.shell().slot_x(slot), 10.0);
                driver.drag_event(DragEvent::DragStart)?;
                driver.drag_event(DragEvent::DragOver(pos))?;
                driver.drag_event(DragEvent::Drop(pos))?;
                driver.drag_event(DragEvent::DragEnd)?;
                moves.extend([
                    Command::BeginDrag(InputModality::Drag),
                    Command::Hover(Some(slot)),
                    Command::Drop(slot),
                ]);
            }
            Phase::Dragging { .. } => {
                driver.drag_event(DragEvent::DragEnd)?;
                moves.push(Command::Cancel);
            }
        }
    }

    let snapshot = driver.game().session().snapshot();
    let mut replay = HeadlessRunner::new(logic);
    let frames = replay.run(moves);
    if replay.state().session().snapshot() != snapshot {
        return Err(format!("replay of {frames} moves diverged from the live game").into());
    }
    tracing::info!(frames, "replay matches the live game");

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    if let Some((_, _, message)) = driver.shell().game_end.as_ref() {
        println!("{message}");
    }
    Ok(())
}
