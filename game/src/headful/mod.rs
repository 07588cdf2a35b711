//! Windowed shell: a `pixels` card table driven by mouse, touch and keyboard.

pub mod layout;
pub mod render;
pub mod shell;
pub mod sfx;

pub use layout::TableLayout;
pub use render::draw_table;
pub use shell::TableShell;
pub use sfx::FeedbackSfx;
