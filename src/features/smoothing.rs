//! Temporal frame smoothing
//!
//! Median-filters frame frequencies over a small centered window to suppress
//! estimation jitter and octave flips. A median is used rather than a mean:
//! an octave error averaged into its neighbors would drag every pitch in the
//! window toward a frequency nobody played.

use crate::features::frame::Frame;

/// Smooth frame frequencies with a centered median filter
///
/// For each frame, collects the voiced frequencies inside a centered window
/// (the frame itself included). With more than half the window voiced, the
/// frame's frequency is replaced by the median of that set. A voiced frame
/// with fewer than two voiced frames in its window is an isolated spurious
/// detection and is forced unvoiced.
///
/// Confidence and volume are left untouched.
///
/// # Arguments
///
/// * `frames` - Ordered frames from extraction
/// * `window` - Filter window size in frames (typically 7)
///
/// # Returns
///
/// A new frame vector of the same length.
pub fn median_smooth(frames: &[Frame], window: usize) -> Vec<Frame> {
    let mut result: Vec<Frame> = frames.to_vec();
    let half = window / 2;

    let mut neighborhood = Vec::with_capacity(window);
    for i in 0..frames.len() {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(frames.len());

        neighborhood.clear();
        neighborhood.extend(
            frames[start..end]
                .iter()
                .filter(|f| f.is_voiced())
                .map(|f| f.frequency),
        );

        if neighborhood.len() > half {
            neighborhood.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            result[i].frequency = neighborhood[neighborhood.len() / 2];
        } else if frames[i].is_voiced() && neighborhood.len() < 2 {
            result[i].frequency = 0.0;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voiced(time: f32, frequency: f32) -> Frame {
        Frame {
            time,
            frequency,
            confidence: 0.9,
            volume: 0.2,
        }
    }

    fn unvoiced(time: f32) -> Frame {
        Frame {
            time,
            frequency: 0.0,
            confidence: 0.0,
            volume: 0.0,
        }
    }

    #[test]
    fn test_octave_spike_is_flattened() {
        let mut frames: Vec<Frame> = (0..9).map(|i| voiced(i as f32 * 0.01, 440.0)).collect();
        frames[4].frequency = 880.0; // octave error in the middle

        let smoothed = median_smooth(&frames, 7);
        assert_eq!(smoothed.len(), frames.len());
        assert!(
            (smoothed[4].frequency - 440.0).abs() < 1e-3,
            "spike survived: {}",
            smoothed[4].frequency
        );
    }

    #[test]
    fn test_isolated_detection_is_suppressed() {
        let mut frames: Vec<Frame> = (0..9).map(|i| unvoiced(i as f32 * 0.01)).collect();
        frames[4] = voiced(0.04, 440.0);

        let smoothed = median_smooth(&frames, 7);
        assert_eq!(smoothed[4].frequency, 0.0);
    }

    #[test]
    fn test_confidence_and_volume_untouched() {
        let frames: Vec<Frame> = (0..9).map(|i| voiced(i as f32 * 0.01, 440.0)).collect();
        let smoothed = median_smooth(&frames, 7);
        for (before, after) in frames.iter().zip(smoothed.iter()) {
            assert_eq!(before.confidence, after.confidence);
            assert_eq!(before.volume, after.volume);
            assert_eq!(before.time, after.time);
        }
    }

    #[test]
    fn test_sparse_voicing_passes_through() {
        // Two voiced frames next to each other: neither reaches the majority
        // needed for the median, but neither is isolated, so both keep their
        // frequency.
        let mut frames: Vec<Frame> = (0..9).map(|i| unvoiced(i as f32 * 0.01)).collect();
        frames[3] = voiced(0.03, 440.0);
        frames[4] = voiced(0.04, 445.0);

        let smoothed = median_smooth(&frames, 7);
        assert_eq!(smoothed[3].frequency, 440.0);
        assert_eq!(smoothed[4].frequency, 445.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(median_smooth(&[], 7).is_empty());
    }
}
