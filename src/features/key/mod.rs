//! Key estimation modules
//!
//! Estimate the musical key of a segment:
//! - Confidence-weighted chroma accumulation over voiced frames
//! - Krumhansl-Schmuckler template correlation (12 roots x 2 modes)

pub mod estimator;
pub mod profiles;

pub use estimator::{build_chroma, estimate_key};

use serde::{Deserialize, Serialize};

/// Scale mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scale {
    /// Major (Ionian) mode
    Major,
    /// Natural minor (Aeolian) mode
    Minor,
}

impl Scale {
    /// Diatonic intervals of the mode, as semitone offsets from the root
    pub fn intervals(&self) -> &'static [i32; 7] {
        match self {
            Scale::Major => &profiles::MAJOR_INTERVALS,
            Scale::Minor => &profiles::MINOR_INTERVALS,
        }
    }
}

/// Estimated key for a segment
///
/// Computed once per segment from aggregate frame data and read by the
/// harmonic quantizer; may also be surfaced for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyEstimate {
    /// Tonic pitch class (0 = C, 1 = C#, ..., 11 = B)
    pub root: u32,

    /// Major or minor mode
    pub scale: Scale,

    /// Correlation score of the winning template; 0.0 when the segment
    /// carried no key signal at all
    pub confidence: f32,
}

impl KeyEstimate {
    /// Key name in musical notation (e.g. "C", "F#", "Am", "D#m")
    pub fn name(&self) -> String {
        let note_names = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        let root = note_names[self.root as usize % 12];
        match self.scale {
            Scale::Major => root.to_string(),
            Scale::Minor => format!("{}m", root),
        }
    }
}
