//! Player progression: experience, levels and medals earned by finishing paintings.

/// XP needed per level.
pub const XP_PER_LEVEL: u32 = 1000;
/// Medal granted on every level-up (kept once).
pub const LEVEL_UP_MEDAL: &str = "🎨";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Profile {
    pub name: String,
    pub xp: u32,
    pub level: u32,
    pub medals: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Explorer".to_owned(),
            xp: 650,
            level: 2,
            medals: vec!["🦴".to_owned(), "🔍".to_owned()],
        }
    }
}

/// What changed after [`Profile::apply_xp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LevelChange {
    pub previous_level: u32,
    pub level: u32,
}

impl LevelChange {
    pub fn leveled_up(self) -> bool {
        self.level > self.previous_level
    }
}

pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

impl Profile {
    /// Add `delta` XP and recompute the level from the total.
    pub fn apply_xp(&mut self, delta: u32) -> LevelChange {
        let previous_level = self.level;
        self.xp = self.xp.saturating_add(delta);
        self.level = level_for_xp(self.xp);

        if self.level > previous_level && !self.medals.iter().any(|m| m == LEVEL_UP_MEDAL) {
            self.medals.push(LEVEL_UP_MEDAL.to_owned());
        }
        // Profiles loaded from disk may carry duplicates.
        let mut seen = std::collections::HashSet::new();
        self.medals.retain(|m| seen.insert(m.clone()));

        LevelChange {
            previous_level,
            level: self.level,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/rewards.rs"]
mod tests;
