//! Analysis pipeline
//!
//! Turns a segment's frames into finalized notes:
//! segmentation, harmonic quantization, rhythmic cleanup, finalization.
//! The whole pipeline sits behind the [`SegmentAnalyzer`] trait so that
//! alternative estimation backends can satisfy the same
//! segment-in/notes-out contract.

pub mod annotate;
pub mod chunked;
pub mod quantize;
pub mod result;
pub mod rhythm;
pub mod segmenter;

pub use annotate::{annotate, AnnotatedNote};
pub use chunked::analyze_recording;
pub use result::{AnalysisMetadata, Note, SegmentAnalysis};
pub use segmenter::RawNote;

use std::time::Instant;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::key::{KeyEstimate, Scale};
use crate::features::{estimate_key, extract_frames, median_smooth, YinDetector};
use crate::io::Segment;
use crate::preprocessing::adaptive_rms_threshold;

/// A strategy that transcribes one segment into notes
///
/// Implementations share a single contract: a segment of decoded audio goes
/// in, temporally ordered notes in recording coordinates come out. The
/// self-contained [`YinAnalyzer`] is the reference strategy; backends that
/// delegate estimation to an external engine fit behind the same trait.
pub trait SegmentAnalyzer {
    /// Analyze one segment
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` for unusable configuration. Degenerate audio
    /// (empty, silent, shorter than one window) produces an empty result,
    /// never an error.
    fn analyze(&self, segment: &Segment<'_>) -> Result<SegmentAnalysis, AnalysisError>;
}

/// The reference transcription strategy
///
/// Deterministic, synchronous, and stateless across invocations: every call
/// runs the full multi-pass pipeline on the segment it is given. Safe to
/// share across threads for parallel per-segment analysis.
pub struct YinAnalyzer {
    config: AnalysisConfig,
}

impl YinAnalyzer {
    /// Create an analyzer with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the configuration is
    /// structurally unusable.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The analyzer's configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn empty_result(&self, segment: &Segment<'_>, started: Instant) -> SegmentAnalysis {
        SegmentAnalysis {
            notes: Vec::new(),
            key: KeyEstimate {
                root: 0,
                scale: Scale::Major,
                confidence: 0.0,
            },
            metadata: AnalysisMetadata {
                duration_seconds: segment.duration(),
                sample_rate: segment.sample_rate,
                num_frames: 0,
                voiced_frames: 0,
                processing_time_ms: started.elapsed().as_secs_f32() * 1000.0,
                algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

impl SegmentAnalyzer for YinAnalyzer {
    fn analyze(&self, segment: &Segment<'_>) -> Result<SegmentAnalysis, AnalysisError> {
        let started = Instant::now();
        let config = &self.config;

        log::debug!(
            "Analyzing segment: {} samples at {} Hz, offset {:.2}s",
            segment.samples.len(),
            segment.sample_rate,
            segment.start_time
        );

        if segment.is_degenerate() {
            log::warn!("Degenerate segment (empty buffer or zero sample rate), empty result");
            return Ok(self.empty_result(segment, started));
        }

        if segment.samples.len() <= config.window_size {
            log::warn!(
                "Segment of {} samples shorter than analysis window ({}), empty result",
                segment.samples.len(),
                config.window_size
            );
            return Ok(self.empty_result(segment, started));
        }

        // Pass 1: adaptive energy gate from coarse RMS sampling.
        let threshold =
            adaptive_rms_threshold(segment.samples, config.rms_floor, config.rms_factor);

        // Pass 2: frame extraction with per-frame pitch estimation.
        let mut detector = YinDetector::new(config);
        let frames = extract_frames(segment, threshold, &mut detector, config);
        let voiced_frames = frames.iter().filter(|f| f.is_voiced()).count();

        // Pass 3: key estimation over the raw (pre-smoothing) frames.
        let key = estimate_key(&frames, config.chroma_confidence_floor);

        // Pass 4: smoothing and segmentation.
        let smoothed = median_smooth(&frames, config.median_window);
        let frame_duration = config.hop_size as f32 / segment.sample_rate as f32;
        let notes = segmenter::segment_notes(&smoothed, frame_duration, config);

        // Pass 5: harmonic quantization against the estimated key.
        let notes = quantize::quantize_to_key(notes, &key);

        // Pass 6: rhythmic cleanup and grid snapping.
        let notes = rhythm::cleanup_and_snap(notes, config);

        let notes = finalize_notes(notes, segment.start_time);

        let processing_time_ms = started.elapsed().as_secs_f32() * 1000.0;
        log::debug!(
            "Segment produced {} notes in {:.1}ms (key {}, {} voiced frames)",
            notes.len(),
            processing_time_ms,
            key.name(),
            voiced_frames
        );

        Ok(SegmentAnalysis {
            notes,
            key,
            metadata: AnalysisMetadata {
                duration_seconds: segment.duration(),
                sample_rate: segment.sample_rate,
                num_frames: frames.len(),
                voiced_frames,
                processing_time_ms,
                algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }
}

/// Assign ids and seal pipeline output into immutable notes
fn finalize_notes(notes: Vec<RawNote>, segment_start: f32) -> Vec<Note> {
    let id_base = segment_start.floor() as i64;
    notes
        .into_iter()
        .enumerate()
        .map(|(i, n)| Note {
            id: format!("note_{}_{}", id_base, i),
            start_time: n.start_time,
            duration: n.duration,
            midi_pitch: n.midi_pitch,
            velocity: n.velocity.clamp(0.0, 1.0),
            confidence: n.confidence.clamp(0.0, 1.0),
        })
        .collect()
}
