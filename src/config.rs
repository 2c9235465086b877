//! Configuration parameters for segment analysis

use crate::error::AnalysisError;

/// Analysis configuration parameters
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // Frame extraction
    /// Analysis window size in samples (default: 2048)
    pub window_size: usize,

    /// Hop size between analysis windows in samples (default: 441, ~10ms at 44.1kHz)
    pub hop_size: usize,

    /// Absolute floor for the adaptive energy threshold (default: 0.005)
    pub rms_floor: f32,

    /// Fraction of the segment's average RMS used as the energy gate (default: 0.2)
    /// The gate only decides which frames run pitch estimation; the final
    /// voiced/unvoiced decision belongs to the estimator's confidence score.
    pub rms_factor: f32,

    // Pitch estimation
    /// Absolute threshold on the normalized difference function (default: 0.15)
    pub yin_threshold: f32,

    /// Ceiling for accepting the global-minimum fallback candidate (default: 0.6)
    /// A best dip above this is treated as noise and reported unvoiced.
    pub yin_fallback_ceiling: f32,

    /// Lowest candidate frequency in Hz (default: 27.5, A0)
    pub min_frequency: f32,

    /// Highest candidate frequency in Hz (default: 4186.0, C8)
    pub max_frequency: f32,

    /// Minimum estimator probability for a frame to count as voiced (default: 0.3)
    pub voicing_confidence_floor: f32,

    // Smoothing
    /// Median filter window in frames, centered (default: 7)
    pub median_window: usize,

    // Note segmentation
    /// Pitch continuity tolerance in semitones (default: 0.8)
    pub pitch_tolerance: f32,

    /// Minimum duration for an emitted note in seconds (default: 0.08)
    pub min_note_duration: f32,

    // Rhythmic cleanup
    /// Notes at or below this duration are dropped as ghosts (default: 0.1)
    pub ghost_note_duration: f32,

    /// Temporal grid unit in seconds (default: 0.125, a 1/16 note at 120 BPM)
    pub grid_unit: f32,

    /// Maximum gap bridged by the legato merge in seconds (default: 0.15)
    pub legato_gap: f32,

    /// Pitch tolerance for merging adjacent notes, in semitones (default: 0.1)
    pub merge_pitch_tolerance: f32,

    // Key estimation
    /// Minimum frame confidence for inclusion in the chroma histogram (default: 0.3)
    pub chroma_confidence_floor: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: 2048,
            hop_size: 441,
            rms_floor: 0.005,
            rms_factor: 0.2,
            yin_threshold: 0.15,
            yin_fallback_ceiling: 0.6,
            min_frequency: 27.5,
            max_frequency: 4186.0,
            voicing_confidence_floor: 0.3,
            median_window: 7,
            pitch_tolerance: 0.8,
            min_note_duration: 0.08,
            ghost_note_duration: 0.1,
            grid_unit: 0.125,
            legato_gap: 0.15,
            merge_pitch_tolerance: 0.1,
            chroma_confidence_floor: 0.3,
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration parameters
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if any structural parameter is
    /// unusable (zero window, zero hop, non-positive grid or frequency range).
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.window_size == 0 {
            return Err(AnalysisError::InvalidInput(
                "Window size must be > 0".to_string(),
            ));
        }

        if self.hop_size == 0 {
            return Err(AnalysisError::InvalidInput(
                "Hop size must be > 0".to_string(),
            ));
        }

        if self.grid_unit <= 0.0 {
            return Err(AnalysisError::InvalidInput(
                "Grid unit must be positive".to_string(),
            ));
        }

        if self.min_frequency <= 0.0 || self.max_frequency <= self.min_frequency {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid frequency range: {} - {} Hz",
                self.min_frequency, self.max_frequency
            )));
        }

        if self.median_window == 0 {
            return Err(AnalysisError::InvalidInput(
                "Median window must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
