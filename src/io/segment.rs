//! Audio segment view
//!
//! A [`Segment`] borrows a span of decoded mono samples together with the
//! sample rate and the span's offset into the full recording. The buffer is
//! owned by the caller for the duration of one analysis call and is never
//! mutated.

/// A borrowed view of single-channel audio at a fixed sample rate
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    /// Mono samples, normalized to [-1.0, 1.0]
    pub samples: &'a [f32],

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Offset of the first sample into the full recording, in seconds.
    /// Frame and note timestamps are reported in recording coordinates.
    pub start_time: f32,
}

impl<'a> Segment<'a> {
    /// Create a segment covering an entire buffer
    pub fn new(samples: &'a [f32], sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            start_time: 0.0,
        }
    }

    /// Slice a segment out of a full recording by time offsets
    ///
    /// Offsets are clamped to the recording bounds; an inverted or
    /// out-of-range span yields an empty segment.
    ///
    /// # Arguments
    ///
    /// * `recording` - The full decoded recording
    /// * `sample_rate` - Sample rate in Hz
    /// * `start_s` - Start offset in seconds
    /// * `end_s` - End offset in seconds
    pub fn from_recording(
        recording: &'a [f32],
        sample_rate: u32,
        start_s: f32,
        end_s: f32,
    ) -> Self {
        let start_sample = ((start_s * sample_rate as f32) as usize).min(recording.len());
        let end_sample = ((end_s * sample_rate as f32) as usize).min(recording.len());
        let end_sample = end_sample.max(start_sample);

        Self {
            samples: &recording[start_sample..end_sample],
            sample_rate,
            start_time: start_s,
        }
    }

    /// Segment duration in seconds
    pub fn duration(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// True if the segment carries no usable signal shape
    pub fn is_degenerate(&self) -> bool {
        self.samples.is_empty() || self.sample_rate == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_recording_slices_by_time() {
        let recording = vec![0.0f32; 44100 * 4];
        let segment = Segment::from_recording(&recording, 44100, 1.0, 3.0);
        assert_eq!(segment.samples.len(), 44100 * 2);
        assert_eq!(segment.start_time, 1.0);
        assert!((segment.duration() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_recording_clamps_out_of_range() {
        let recording = vec![0.0f32; 44100];
        let segment = Segment::from_recording(&recording, 44100, 0.5, 10.0);
        assert_eq!(segment.samples.len(), 44100 / 2);
    }

    #[test]
    fn test_inverted_span_is_empty() {
        let recording = vec![0.0f32; 44100];
        let segment = Segment::from_recording(&recording, 44100, 0.8, 0.2);
        assert!(segment.samples.is_empty());
        assert!(segment.is_degenerate());
    }
}
