//! Analysis result types

use serde::{Deserialize, Serialize};

use crate::features::key::KeyEstimate;

/// A finalized transcribed note
///
/// The durable output unit of segment analysis. Timestamps are in the
/// coordinate space of the original recording. Instances are immutable once
/// returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Stable identifier, unique within one analysis call
    pub id: String,

    /// Onset in seconds, snapped to the rhythmic grid
    pub start_time: f32,

    /// Duration in seconds; always positive and a multiple of the grid unit
    pub duration: f32,

    /// MIDI pitch; integral after harmonic quantization except for strong
    /// out-of-key notes, which keep their rounded chromatic value
    pub midi_pitch: f32,

    /// Loudness in [0, 1], derived from the onset frame's RMS
    pub velocity: f32,

    /// Detection confidence in [0, 1]
    pub confidence: f32,
}

impl Note {
    /// End of the note in seconds
    pub fn end_time(&self) -> f32 {
        self.start_time + self.duration
    }
}

/// Summary metadata for one segment analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Segment duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Total analysis frames examined
    pub num_frames: usize,

    /// Frames that carried a pitch estimate
    pub voiced_frames: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Engine version that produced this result
    pub algorithm_version: String,
}

/// Complete result of analyzing one segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentAnalysis {
    /// Transcribed notes in temporal order
    pub notes: Vec<Note>,

    /// Estimated key of the segment; zero confidence means no key signal
    pub key: KeyEstimate,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}
