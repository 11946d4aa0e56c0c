pub mod engine;
pub mod pointer;
pub mod script;
pub mod settings;

pub use engine::{BrushEngine, CursorPreview, StrokeSession};
pub use pointer::{DisplayRect, PointerCoords, PointerEvent, coordinate_for};
pub use script::{ScriptedStroke, StrokeScript};
pub use settings::BrushSettings;
