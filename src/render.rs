pub mod composite;
pub mod surface;

pub use composite::CompositeMode;
pub use surface::{FrameRgba, RasterSurface};
