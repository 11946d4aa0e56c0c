use crate::foundation::core::{Canvas, Point};

/// Raw pointer input in client (viewport) coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PointerEvent {
    Mouse { client: Point },
    /// Active touch points; only the first one is used.
    Touch { touches: Vec<Point> },
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse {
            client: Point::new(x, y),
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self::Touch {
            touches: vec![Point::new(x, y)],
        }
    }

    fn client(&self) -> Option<Point> {
        match self {
            Self::Mouse { client } => Some(*client),
            Self::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Where the surface is displayed, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    /// Surface shown at its intrinsic size with its top-left corner at the origin.
    pub fn unscaled(canvas: Canvas) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: f64::from(canvas.width),
            height: f64::from(canvas.height),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PointerCoords {
    /// Position in surface pixels.
    pub canvas: Point,
    /// Position relative to the displayed surface's top-left corner, unscaled.
    pub viewport: Point,
}

/// Map a pointer event onto the surface.
///
/// Returns `None` for a touch event without touch points or a degenerate display rect.
pub fn coordinate_for(event: &PointerEvent, rect: DisplayRect, canvas: Canvas) -> Option<PointerCoords> {
    let client = event.client()?;
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }

    let raw = Point::new(client.x - rect.left, client.y - rect.top);
    let scale_x = f64::from(canvas.width) / rect.width;
    let scale_y = f64::from(canvas.height) / rect.height;

    Some(PointerCoords {
        canvas: Point::new(raw.x * scale_x, raw.y * scale_y),
        viewport: raw,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/brush/pointer.rs"]
mod tests;
