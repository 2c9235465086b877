//! Preprocessing utilities

pub mod threshold;

pub use threshold::adaptive_rms_threshold;
