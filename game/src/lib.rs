//! Chronocards: place historical events on a timeline in chronological order.
//!
//! The rules live in `session`, `validator` and `machine`; `driver` connects them to any
//! `HostShell`. `headful` is the windowed shell used by the `headful` binary.

pub mod catalog;
pub mod deck;
pub mod driver;
pub mod error;
pub mod headful;
pub mod host;
pub mod input;
pub mod logic;
pub mod machine;
pub mod session;
pub mod settings;
pub mod timeline;
pub mod timers;
pub mod validator;

pub use catalog::{EventId, EventRecord};
pub use driver::Driver;
pub use error::GameError;
pub use machine::{Command, Effect, Game, Phase};
pub use session::{GameOutcome, SessionState};

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber used by both binaries. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Loads the catalog named in settings, or the built-in one.
pub fn load_configured_catalog(
    settings: &settings::PlayerSettings,
) -> Result<Vec<EventRecord>, GameError> {
    match settings.catalog_path.as_deref() {
        Some(path) => {
            let events = catalog::load_catalog(path)?;
            tracing::info!(path = %path.display(), events = events.len(), "loaded catalog");
            Ok(events)
        }
        None => Ok(catalog::builtin_catalog()),
    }
}
