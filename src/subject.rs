use serde::Deserialize;

/// A course the tutor can answer for
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subject {
    pub id: u32,
    pub title: String,
    pub category: String,
    /// Subject-specific guidance folded into every prompt.
    pub instructions: String,
}

const SUMMARY_CHARS: usize = 120;

impl Subject {
    /// First part of the instructions, for listings.
    pub fn summary(&self) -> String {
        let head: String = self.instructions.chars().take(SUMMARY_CHARS).collect();
        format!("{head}...")
    }
}
