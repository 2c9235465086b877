//! Long-form recording analysis
//!
//! Splits a long recording into fixed-length overlapping chunks, analyzes
//! each chunk independently, and concatenates the results in recording
//! coordinates. Chunks are independent by construction (the per-segment
//! pipeline is stateless), so they run in parallel.
//!
//! Known gap: notes falling inside the overlap region between adjacent
//! chunks are not deduplicated or cross-faded, so a note sustained across a
//! chunk seam can appear twice (or truncated). Callers that need seamless
//! long-form output should post-process the overlap windows.

use rayon::prelude::*;

use crate::analysis::{SegmentAnalyzer, YinAnalyzer};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::io::Segment;

use super::result::Note;

/// Chunk length in seconds for long-form analysis
pub const CHUNK_SECONDS: f32 = 30.0;

/// Overlap between adjacent chunks in seconds
pub const CHUNK_OVERLAP_SECONDS: f32 = 5.0;

/// Analyze a full recording in overlapping chunks
///
/// Each chunk is an independent segment analysis; a failed chunk contributes
/// an empty note list rather than aborting the rest of the timeline. Results
/// are concatenated and sorted by onset.
///
/// # Arguments
///
/// * `recording` - Full decoded mono recording
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Analysis parameters, shared across chunks
///
/// # Returns
///
/// All transcribed notes in recording coordinates, ordered by start time.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` only for unusable configuration;
/// degenerate audio yields an empty note list.
pub fn analyze_recording(
    recording: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<Vec<Note>, AnalysisError> {
    config.validate()?;

    if recording.is_empty() || sample_rate == 0 {
        log::warn!("Degenerate recording (empty buffer or zero sample rate), no notes");
        return Ok(Vec::new());
    }

    let duration = recording.len() as f32 / sample_rate as f32;
    let stride = CHUNK_SECONDS - CHUNK_OVERLAP_SECONDS;

    let mut chunk_starts = Vec::new();
    let mut start = 0.0f32;
    loop {
        chunk_starts.push(start);
        if start + CHUNK_SECONDS >= duration {
            break;
        }
        start += stride;
    }

    log::debug!(
        "Analyzing {:.1}s recording in {} chunks of {}s (overlap {}s)",
        duration,
        chunk_starts.len(),
        CHUNK_SECONDS,
        CHUNK_OVERLAP_SECONDS
    );

    let analyzer = YinAnalyzer::new(config.clone())?;

    let mut notes: Vec<Note> = chunk_starts
        .par_iter()
        .flat_map(|&chunk_start| {
            let segment = Segment::from_recording(
                recording,
                sample_rate,
                chunk_start,
                chunk_start + CHUNK_SECONDS,
            );
            match analyzer.analyze(&segment) {
                Ok(analysis) => analysis.notes,
                Err(e) => {
                    // Keep the rest of the timeline; this chunk just goes
                    // silent.
                    log::warn!("Chunk at {:.1}s failed: {}", chunk_start, e);
                    Vec::new()
                }
            }
        })
        .collect();

    notes.sort_by(|a, b| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const SAMPLE_RATE: u32 = 44100;

    fn sine(freq: f32, duration: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f32 / SAMPLE_RATE as f32).sin())
            .collect()
    }

    #[test]
    fn test_short_recording_single_chunk() {
        let recording = sine(440.0, 2.0);
        let notes = analyze_recording(&recording, SAMPLE_RATE, &AnalysisConfig::default())
            .expect("analysis should succeed");
        assert!(!notes.is_empty());
        assert!((notes[0].midi_pitch - 69.0).abs() < 0.5);
    }

    #[test]
    fn test_empty_recording_yields_no_notes() {
        let notes = analyze_recording(&[], SAMPLE_RATE, &AnalysisConfig::default()).unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn test_zero_sample_rate_yields_no_notes() {
        let recording = sine(440.0, 1.0);
        let notes = analyze_recording(&recording, 0, &AnalysisConfig::default()).unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let recording = sine(440.0, 1.0);
        let config = AnalysisConfig {
            hop_size: 0,
            ..Default::default()
        };
        assert!(analyze_recording(&recording, SAMPLE_RATE, &config).is_err());
    }

    #[test]
    fn test_notes_sorted_and_in_recording_coordinates() {
        // 35s recording spans two chunks; a tone late in the second chunk
        // must come out with its absolute timestamp.
        let mut recording = vec![0.0f32; (SAMPLE_RATE as f32 * 33.0) as usize];
        recording.extend(sine(440.0, 2.0));

        let notes = analyze_recording(&recording, SAMPLE_RATE, &AnalysisConfig::default())
            .expect("analysis should succeed");
        assert!(!notes.is_empty());
        for pair in notes.windows(2) {
            assert!(pair[0].start_time <= pair[1].start_time);
        }
        let last = notes.last().unwrap();
        assert!(
            last.start_time > 30.0,
            "expected a note after the chunk seam, got start {}",
            last.start_time
        );
    }
}
