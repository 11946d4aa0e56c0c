//! Short texts from the museum guide character shown next to the canvas.
//!
//! Text generation lives outside this crate behind [`CompanionText`]. Callers go through
//! [`fact_or_fallback`] and [`feedback_or_fallback`], which never fail.

use crate::foundation::error::PaleoResult;

/// Used when the fact service answers with an empty text.
pub const FACT_EMPTY_FALLBACK: &str =
    "I couldn't dig up that fact, but I bet it was gigantic!";
/// Used when the fact service fails.
pub const FACT_ERROR_FALLBACK: &str = "The ancient giants of Falcón were incredible! 🦴✨";
/// Used when the feedback service answers with an empty text.
pub const FEEDBACK_EMPTY_FALLBACK: &str =
    "Excellent work, young explorer! You earned 150 bone points!";
/// Used when the feedback service fails.
pub const FEEDBACK_ERROR_FALLBACK: &str =
    "Your art is worthy of a prehistoric cave in Falcón! 🎨🦕";

/// Source of guide texts, typically a remote language model.
pub trait CompanionText {
    /// A short fun fact for children about `species_name`.
    fn species_fact(&mut self, species_name: &str) -> PaleoResult<String>;

    /// Praise for a finished painting of `species_name`.
    fn art_feedback(&mut self, species_name: &str) -> PaleoResult<String>;
}

/// Prompt asking for a two-sentence fact about `species_name`.
pub fn fact_prompt(species_name: &str) -> String {
    format!(
        "You are Taimi, a friendly glyptodont guide at the Taima-Taima museum in Falcón, \
         Venezuela. Tell a child one short, curious fact (at most 2 sentences) about the \
         {species_name}. Mention that we are from Falcón and use prehistoric emojis. Be \
         enthusiastic."
    )
}

/// Prompt asking for at most 15 words of praise for a painting of `species_name`.
pub fn feedback_prompt(species_name: &str) -> String {
    format!(
        "As Taimi the glyptodont, warmly congratulate a child on their drawing of the \
         {species_name}. Say their technique is \"paleo-awesome\" and give them an imaginary \
         medal. Be very brief (at most 15 words)."
    )
}

pub fn fact_or_fallback(source: &mut dyn CompanionText, species_name: &str) -> String {
    resolve(
        source.species_fact(species_name),
        FACT_EMPTY_FALLBACK,
        FACT_ERROR_FALLBACK,
    )
}

pub fn feedback_or_fallback(source: &mut dyn CompanionText, species_name: &str) -> String {
    resolve(
        source.art_feedback(species_name),
        FEEDBACK_EMPTY_FALLBACK,
        FEEDBACK_ERROR_FALLBACK,
    )
}

fn resolve(reply: PaleoResult<String>, empty: &str, failed: &str) -> String {
    match reply {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => empty.to_owned(),
        Err(err) => {
            tracing::warn!(error = %err, "companion text unavailable");
            failed.to_owned()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/companion.rs"]
mod tests;
