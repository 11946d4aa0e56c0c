use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{PaleoError, PaleoResult};

/// One recorded gesture: brush settings plus canvas-space sample points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedStroke {
    pub color: Rgba8,
    pub width: f64,
    pub points: Vec<[f64; 2]>,
}

impl ScriptedStroke {
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|[x, y]| Point::new(*x, *y))
    }
}

/// Ordered gestures replayed onto a mask, e.g. from a JSON file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StrokeScript {
    pub strokes: Vec<ScriptedStroke>,
}

impl StrokeScript {
    pub fn from_json_str(s: &str) -> PaleoResult<Self> {
        let script: Self = serde_json::from_str(s)
            .map_err(|e| PaleoError::serde(format!("stroke script: {e}")))?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_json_file(path: &Path) -> PaleoResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read stroke script '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> PaleoResult<()> {
        for (i, stroke) in self.strokes.iter().enumerate() {
            if stroke.points.is_empty() {
                return Err(PaleoError::validation(format!("stroke {i} has no points")));
            }
            if stroke.points.iter().flatten().any(|v| !v.is_finite()) {
                return Err(PaleoError::validation(format!(
                    "stroke {i} has a non-finite point"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brush/script.rs"]
mod tests;
