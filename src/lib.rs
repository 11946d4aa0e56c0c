//! Paleo Canvas turns a species photo into a coloring-book silhouette and lets a player
//! paint inside it.
//!
//! The public API is session-oriented:
//!
//! - Pick a [`Species`] from a [`Catalog`]
//! - Load it into a [`PaintSession`] through an [`ImageFetcher`]
//! - Feed pointer events; strokes only land on the silhouette
//! - [`PaintSession::finish`] to snapshot the painting and award XP to a [`Profile`]
#![forbid(unsafe_code)]

pub mod assets;
pub mod brush;
pub mod catalog;
pub mod companion;
pub mod foundation;
pub mod mask;
pub mod render;
pub mod rewards;
pub mod session;

pub use crate::assets::SourceImage;
pub use crate::assets::decode::{decode_fetched, decode_image};
#[cfg(feature = "http")]
pub use crate::assets::fetch::HttpFetcher;
pub use crate::assets::fetch::{FetchedImage, FileFetcher, ImageFetcher, cache_busted_url};
pub use crate::brush::{
    BrushEngine, BrushSettings, CursorPreview, DisplayRect, PointerCoords, PointerEvent,
    ScriptedStroke, StrokeScript, coordinate_for,
};
pub use crate::catalog::{Catalog, Species};
pub use crate::companion::{CompanionText, fact_or_fallback, feedback_or_fallback};
pub use crate::foundation::config::StudioConfig;
pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{PaleoError, PaleoResult};
pub use crate::mask::{MaskReport, MaskSettings, SilhouetteMasker};
pub use crate::render::{CompositeMode, FrameRgba, RasterSurface};
pub use crate::rewards::{LevelChange, Profile};
pub use crate::session::{CanvasEvent, Finish, LoadRequest, LoadState, PaintSession};
