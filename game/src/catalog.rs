use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Stable identity of an event card. The built-in catalog uses the event name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a shell shows on a card. The engine never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDisplay {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub notice: String,
}

/// A single dated historical fact card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub year: i32,
    pub display: EventDisplay,
}

impl EventRecord {
    pub fn new(name: &str, year: i32, emoji: &str, notice: &str) -> Self {
        Self {
            id: EventId::new(name),
            year,
            display: EventDisplay {
                name: name.to_string(),
                emoji: emoji.to_string(),
                notice: notice.to_string(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.display.name
    }
}

/// On-disk catalog entry, `{name, year, emoji, notice}`.
#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    id: Option<String>,
    name: String,
    year: i32,
    #[serde(default)]
    emoji: String,
    #[serde(default)]
    notice: String,
}

impl From<CatalogEntry> for EventRecord {
    fn from(entry: CatalogEntry) -> Self {
        let id = EventId::new(entry.id.unwrap_or_else(|| entry.name.clone()));
        Self {
            id,
            year: entry.year,
            display: EventDisplay {
                name: entry.name,
                emoji: entry.emoji,
                notice: entry.notice,
            },
        }
    }
}

const BUILTIN: [(&str, i32, &str, &str); 10] = [
    (
        "Birth of Christ",
        0,
        "👶",
        "Marks the beginning of the Christian era. Celebrated as Christmas worldwide.",
    ),
    (
        "Fall of Rome",
        476,
        "🏛️",
        "End of the Western Roman Empire. Marked the transition to the Middle Ages.",
    ),
    (
        "Discovery of America",
        1492,
        "🚢",
        "Christopher Columbus reached the Americas. Led to European exploration and colonization.",
    ),
    (
        "French Revolution",
        1789,
        "🇫🇷",
        "Overthrew the monarchy in France. Inspired democratic movements across Europe.",
    ),
    (
        "World War I Begins",
        1914,
        "⚔️",
        "Global conflict involving major powers. Reshaped international politics and borders.",
    ),
    (
        "Moon Landing",
        1969,
        "🌙",
        "Neil Armstrong became the first human on the moon. Marked a milestone in space exploration.",
    ),
    (
        "Fall of Berlin Wall",
        1989,
        "🧱",
        "Symbolized the end of the Cold War. Led to German reunification.",
    ),
    (
        "Internet Goes Public",
        1991,
        "🌐",
        "World Wide Web became publicly available. Revolutionized global communication and commerce.",
    ),
    (
        "9/11 Attacks",
        2001,
        "🏙️",
        "Terrorist attacks on the United States. Led to global changes in security and foreign policy.",
    ),
    (
        "First iPhone Released",
        2007,
        "📱",
        "Apple introduced the iPhone. Revolutionized mobile technology and communication.",
    ),
];

/// The compiled-in catalog: ten events spanning years 0 to 2007.
pub fn builtin_catalog() -> Vec<EventRecord> {
    BUILTIN
        .iter()
        .map(|&(name, year, emoji, notice)| EventRecord::new(name, year, emoji, notice))
        .collect()
}

/// Checks that a catalog is playable: non-empty and unique by id.
pub fn validate_catalog(events: &[EventRecord]) -> Result<(), GameError> {
    if events.is_empty() {
        return Err(GameError::EmptyCatalog);
    }
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if !seen.insert(&event.id) {
            return Err(GameError::DuplicateEvent(event.id.clone()));
        }
    }
    Ok(())
}

/// Parses a JSON array of `{name, year, emoji?, notice?, id?}` objects.
pub fn parse_catalog(json: &str) -> Result<Vec<EventRecord>, GameError> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
    let events: Vec<EventRecord> = entries.into_iter().map(EventRecord::from).collect();
    validate_catalog(&events)?;
    Ok(events)
}

pub fn load_catalog(path: &Path) -> Result<Vec<EventRecord>, GameError> {
    let text = fs::read_to_string(path).map_err(|source| GameError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&text)
}
