//! # pitchscribe
//!
//! A monophonic transcription engine: converts a decoded audio segment into
//! a sequence of discrete musical notes (pitch, timing, velocity,
//! confidence) suitable for notation rendering and intonation analysis.
//!
//! ## Features
//!
//! - **Pitch tracking**: per-frame YIN fundamental-frequency estimation with
//!   periodicity-based confidence
//! - **Key estimation**: chroma accumulation with Krumhansl-Schmuckler
//!   template matching
//! - **Note segmentation**: pitch-continuity grouping with median smoothing,
//!   harmonic quantization, and rhythmic grid snapping
//!
//! ## Quick Start
//!
//! ```
//! use pitchscribe::{analyze_segment, AnalysisConfig};
//!
//! // Decoded mono samples, normalized to [-1.0, 1.0]
//! let samples: Vec<f32> = vec![0.0; 44100];
//! let sample_rate = 44100;
//!
//! let analysis = analyze_segment(&samples, sample_rate, 0.0, AnalysisConfig::default())?;
//!
//! for note in &analysis.notes {
//!     println!("{:.2}s +{:.2}s pitch {:.1}", note.start_time, note.duration, note.midi_pitch);
//! }
//! println!("Key: {} (confidence {:.2})", analysis.key.name(), analysis.key.confidence);
//! # Ok::<(), pitchscribe::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! The pipeline is a fixed sequence of passes, each consuming the previous
//! pass's output:
//!
//! ```text
//! Segment -> Energy Gate -> Frames (YIN) -> Key Estimate
//!         -> Median Smoothing -> Note Segmentation
//!         -> Harmonic Quantization -> Rhythmic Cleanup -> Notes
//! ```
//!
//! Everything is synchronous, single-threaded, and deterministic per
//! segment; callers may parallelize across segments freely. For long
//! recordings, [`analyze_recording`] handles chunking.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::{
    analyze_recording, annotate, AnalysisMetadata, AnnotatedNote, Note, SegmentAnalysis,
    SegmentAnalyzer, YinAnalyzer,
};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::key::{KeyEstimate, Scale};
pub use io::Segment;

/// Analyze one audio segment
///
/// Runs the full transcription pipeline on a span of decoded mono audio and
/// returns the transcribed notes, the estimated key, and analysis metadata.
/// Note timestamps are reported in recording coordinates: `start_time` is
/// added to every onset.
///
/// # Arguments
///
/// * `samples` - Decoded mono samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `start_time` - Offset of the segment into the full recording, seconds
/// * `config` - Analysis configuration parameters
///
/// # Returns
///
/// A [`SegmentAnalysis`]. Degenerate audio (empty buffer, zero sample rate,
/// or a segment shorter than one analysis window) yields an empty result
/// rather than an error, so one bad segment never aborts a caller's longer
/// timeline.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the configuration itself is
/// unusable (zero window, zero hop, non-positive grid).
///
/// # Example
///
/// ```
/// use pitchscribe::{analyze_segment, AnalysisConfig};
///
/// let samples = vec![0.0f32; 44100 * 2]; // 2 seconds of silence
/// let analysis = analyze_segment(&samples, 44100, 0.0, AnalysisConfig::default())?;
/// assert!(analysis.notes.is_empty());
/// # Ok::<(), pitchscribe::AnalysisError>(())
/// ```
pub fn analyze_segment(
    samples: &[f32],
    sample_rate: u32,
    start_time: f32,
    config: AnalysisConfig,
) -> Result<SegmentAnalysis, AnalysisError> {
    let analyzer = YinAnalyzer::new(config)?;
    let segment = Segment {
        samples,
        sample_rate,
        start_time,
    };
    analyzer.analyze(&segment)
}
