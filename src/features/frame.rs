//! Frame extraction
//!
//! Slides a fixed-size analysis window across a segment. Frames whose RMS
//! clears the adaptive energy gate run pitch estimation; everything else is
//! marked unvoiced. One frame is emitted per hop, in temporal order, covering
//! the segment up to the final partial window.

use crate::config::AnalysisConfig;
use crate::features::pitch::YinDetector;
use crate::io::Segment;

/// A single analysis frame
///
/// Ephemeral intermediate record: produced here, consumed by the smoother and
/// the note segmenter, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Frame start time in recording coordinates, seconds
    pub time: f32,

    /// Estimated fundamental frequency in Hz; 0.0 marks an unvoiced frame
    pub frequency: f32,

    /// Periodicity confidence in [0, 1]; 0.0 for unvoiced frames
    pub confidence: f32,

    /// Frame RMS amplitude; 0.0 for unvoiced frames
    pub volume: f32,
}

impl Frame {
    /// True if the frame carries a pitch estimate
    pub fn is_voiced(&self) -> bool {
        self.frequency > 0.0
    }

    fn unvoiced(time: f32) -> Self {
        Self {
            time,
            frequency: 0.0,
            confidence: 0.0,
            volume: 0.0,
        }
    }
}

/// Extract annotated frames from a segment
///
/// For each hop position where a full window fits strictly inside the
/// segment, computes the window RMS. Windows above `threshold` run the pitch
/// estimator; a frame is recorded as voiced only when the estimator returns a
/// positive frequency with probability above the voicing floor, otherwise the
/// frame is zeroed.
///
/// # Arguments
///
/// * `segment` - Input segment (never mutated)
/// * `threshold` - Adaptive energy gate from [`crate::preprocessing::adaptive_rms_threshold`]
/// * `detector` - Pitch estimator, reused across frames for its scratch buffers
/// * `config` - Analysis parameters (window size, hop size, voicing floor)
///
/// # Returns
///
/// One frame per hop, in temporal order. A segment shorter than one window
/// yields no frames.
pub fn extract_frames(
    segment: &Segment<'_>,
    threshold: f32,
    detector: &mut YinDetector,
    config: &AnalysisConfig,
) -> Vec<Frame> {
    let samples = segment.samples;
    let window = config.window_size;
    let sample_rate = segment.sample_rate;

    if samples.len() <= window {
        log::debug!(
            "Segment of {} samples shorter than window ({}), no frames extracted",
            samples.len(),
            window
        );
        return Vec::new();
    }

    let num_hops = (samples.len() - window - 1) / config.hop_size + 1;
    let mut frames = Vec::with_capacity(num_hops);

    for start in (0..samples.len() - window).step_by(config.hop_size) {
        let chunk = &samples[start..start + window];
        let time = segment.start_time + start as f32 / sample_rate as f32;

        let sum_sq: f32 = chunk.iter().map(|&s| s * s).sum();
        let frame_rms = (sum_sq / chunk.len() as f32).sqrt();

        if frame_rms <= threshold {
            frames.push(Frame::unvoiced(time));
            continue;
        }

        let estimate = detector.estimate(chunk, sample_rate);
        if estimate.frequency > 0.0 && estimate.probability > config.voicing_confidence_floor {
            frames.push(Frame {
                time,
                frequency: estimate.frequency,
                confidence: estimate.probability,
                volume: frame_rms,
            });
        } else {
            frames.push(Frame::unvoiced(time));
        }
    }

    log::debug!(
        "Extracted {} frames ({} voiced) from {} samples",
        frames.len(),
        frames.iter().filter(|f| f.is_voiced()).count(),
        samples.len()
    );

    frames
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
    fn test_sine_yields_voiced_frames() {
        let samples = sine(440.0, 1.0);
        let segment = Segment::new(&samples, SAMPLE_RATE);
        let config = AnalysisConfig::default();
        let mut detector = YinDetector::new(&config);

        let frames = extract_frames(&segment, 0.005, &mut detector, &config);
        assert!(!frames.is_empty());

        let voiced = frames.iter().filter(|f| f.is_voiced()).count();
        assert!(
            voiced * 10 >= frames.len() * 9,
            "expected nearly all frames voiced, got {}/{}",
            voiced,
            frames.len()
        );

        for frame in frames.iter().filter(|f| f.is_voiced()) {
            assert!((frame.frequency - 440.0).abs() < 5.0);
            assert!(frame.confidence > 0.3);
            assert!(frame.volume > 0.0);
        }
    }

    #[test]
    fn test_silence_yields_unvoiced_frames() {
        let samples = vec![0.0f32; SAMPLE_RATE as usize];
        let segment = Segment::new(&samples, SAMPLE_RATE);
        let config = AnalysisConfig::default();
        let mut detector = YinDetector::new(&config);

        let frames = extract_frames(&segment, 0.005, &mut detector, &config);
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|f| !f.is_voiced()));
        assert!(frames.iter().all(|f| f.confidence == 0.0 && f.volume == 0.0));
    }

    #[test]
    fn test_short_segment_yields_no_frames() {
        let samples = vec![0.1f32; 1000];
        let segment = Segment::new(&samples, SAMPLE_RATE);
        let config = AnalysisConfig::default();
        let mut detector = YinDetector::new(&config);

        let frames = extract_frames(&segment, 0.005, &mut detector, &config);
        assert!(frames.is_empty());
    }

    #[test]
    fn test_frame_times_carry_segment_offset() {
        let samples = sine(440.0, 0.5);
        let segment = Segment {
            samples: &samples,
            sample_rate: SAMPLE_RATE,
            start_time: 12.0,
        };
        let config = AnalysisConfig::default();
        let mut detector = YinDetector::new(&config);

        let frames = extract_frames(&segment, 0.005, &mut detector, &config);
        assert!(!frames.is_empty());
        assert!((frames[0].time - 12.0).abs() < 1e-6);
        let hop_s = config.hop_size as f32 / SAMPLE_RATE as f32;
        assert!((frames[1].time - 12.0 - hop_s).abs() < 1e-5);
    }
}
