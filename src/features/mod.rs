//! Feature extraction modules
//!
//! Per-frame pitch tracking and the aggregate features derived from it:
//! - Frame extraction (windowed RMS + pitch estimation)
//! - YIN fundamental-frequency estimation
//! - Temporal median smoothing
//! - Chroma-based key estimation

pub mod frame;
pub mod key;
pub mod pitch;
pub mod smoothing;

pub use frame::{extract_frames, Frame};
pub use key::{estimate_key, KeyEstimate, Scale};
pub use pitch::{midi_from_frequency, PitchEstimate, YinDetector};
pub use smoothing::median_smooth;
