use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PaleoError, PaleoResult};

/// Immutable reference data for one paintable species.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Species {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    /// Photo the silhouette is derived from.
    pub silhouette_url: String,
    pub base_color: Rgba8,
    pub description: String,
}

/// Ordered, non-empty set of species offered to the player.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Catalog {
    species: Vec<Species>,
}

impl Catalog {
    pub fn new(species: Vec<Species>) -> PaleoResult<Self> {
        if species.is_empty() {
            return Err(PaleoError::validation("catalog must not be empty"));
        }
        for (i, s) in species.iter().enumerate() {
            if s.id.trim().is_empty() {
                return Err(PaleoError::validation(format!("species #{i} has an empty id")));
            }
            if species[..i].iter().any(|o| o.id == s.id) {
                return Err(PaleoError::validation(format!(
                    "duplicate species id '{}'",
                    s.id
                )));
            }
        }
        Ok(Self { species })
    }

    /// The three Pleistocene giants of the Taima-Taima site.
    pub fn builtin() -> Self {
        let entry = |id: &str, name: &str, sci: &str, url: &str, color: Rgba8, desc: &str| {
            Species {
                id: id.to_string(),
                name: name.to_string(),
                scientific_name: sci.to_string(),
                silhouette_url: url.to_string(),
                base_color: color,
                description: desc.to_string(),
            }
        };
        Self {
            species: vec![
                entry(
                    "glyptodon",
                    "Glyptodon",
                    "Glyptotherium sp.",
                    "https://images.unsplash.com/photo-1551103756-c4ea6eaf391f?auto=format&fit=crop&q=80&w=800",
                    Rgba8::opaque(0x27, 0xAE, 0x60),
                    "A giant armadillo with an impenetrable bony shell.",
                ),
                entry(
                    "mastodon",
                    "Mastodon",
                    "Notiomastodon platensis",
                    "https://images.unsplash.com/photo-1581022295087-35e593704911?auto=format&fit=crop&q=80&w=800",
                    Rgba8::opaque(0x29, 0x80, 0xB9),
                    "A distant relative of elephants that visited the Taima-Taima springs.",
                ),
                entry(
                    "sabertooth",
                    "Saber-tooth",
                    "Smilodon populator",
                    "https://images.unsplash.com/photo-1564349683136-77e08bef1ef1?auto=format&fit=crop&q=80&w=800",
                    Rgba8::opaque(0x9C, 0x42, 0x21),
                    "A fierce predator with knife-long canines that roamed the Falcon savannas.",
                ),
            ],
        }
    }

    pub fn from_json_file(path: &Path) -> PaleoResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read catalog '{}'", path.display()))?;
        let species: Vec<Species> =
            serde_json::from_slice(&bytes).map_err(|e| PaleoError::serde(e.to_string()))?;
        Self::new(species)
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn first(&self) -> &Species {
        &self.species[0]
    }

    pub fn get(&self, id: &str) -> PaleoResult<&Species> {
        self.species
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| PaleoError::validation(format!("unknown species '{id}'")))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../tests/unit/catalog.rs"]
mod tests;
