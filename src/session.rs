pub mod paint;
pub mod state;

pub use paint::{CanvasEvent, Finish, LoadRequest, PaintSession};
pub use state::LoadState;
