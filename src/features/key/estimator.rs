//! Key estimation
//!
//! Builds a confidence-weighted 12-bin chroma histogram from the voiced
//! frames of a segment and correlates it, under all 12 rotations, against the
//! Krumhansl-Schmuckler major and minor profiles. The best-scoring rotation
//! and mode win; at equal correlation the major reading is kept, since major
//! rotations are scanned first.

use super::profiles::{MAJOR_PROFILE, MINOR_PROFILE};
use super::{KeyEstimate, Scale};
use crate::features::frame::Frame;
use crate::features::pitch::midi_from_frequency;

/// Accumulate a confidence-weighted chroma vector from frames
///
/// Each voiced frame with confidence above `confidence_floor` contributes its
/// confidence to the bin of its rounded pitch class. The histogram is
/// normalized by the total accumulated weight.
///
/// # Returns
///
/// `Some(chroma)` normalized to unit weight, or `None` when no frame
/// qualified (no key signal).
pub fn build_chroma(frames: &[Frame], confidence_floor: f32) -> Option<[f32; 12]> {
    let mut chroma = [0.0f32; 12];
    let mut total_weight = 0.0f32;

    for frame in frames {
        if frame.frequency > 0.0 && frame.confidence > confidence_floor {
            let midi = midi_from_frequency(frame.frequency);
            let pitch_class = (midi.round() as i32).rem_euclid(12) as usize;
            chroma[pitch_class] += frame.confidence;
            total_weight += frame.confidence;
        }
    }

    if total_weight == 0.0 {
        return None;
    }

    for bin in chroma.iter_mut() {
        *bin /= total_weight;
    }
    Some(chroma)
}

/// Estimate the key of a segment from its frames
///
/// # Arguments
///
/// * `frames` - All frames of the segment (voiced and unvoiced)
/// * `confidence_floor` - Minimum frame confidence for chroma inclusion
///   (typically 0.3)
///
/// # Returns
///
/// The best-fitting [`KeyEstimate`]. A segment with no qualifying voiced
/// frames returns C major with zero confidence, which downstream consumers
/// treat as "no key signal".
pub fn estimate_key(frames: &[Frame], confidence_floor: f32) -> KeyEstimate {
    let chroma = match build_chroma(frames, confidence_floor) {
        Some(chroma) => chroma,
        None => {
            log::debug!("No voiced frames above confidence floor, key defaults to C major");
            return KeyEstimate {
                root: 0,
                scale: Scale::Major,
                confidence: 0.0,
            };
        }
    };

    let mut best_corr = f32::NEG_INFINITY;
    let mut best_root = 0u32;
    let mut best_scale = Scale::Major;

    for root in 0..12u32 {
        let corr = correlate(&chroma, root, &MAJOR_PROFILE);
        if corr > best_corr {
            best_corr = corr;
            best_root = root;
            best_scale = Scale::Major;
        }
    }

    for root in 0..12u32 {
        let corr = correlate(&chroma, root, &MINOR_PROFILE);
        if corr > best_corr {
            best_corr = corr;
            best_root = root;
            best_scale = Scale::Minor;
        }
    }

    let estimate = KeyEstimate {
        root: best_root,
        scale: best_scale,
        confidence: best_corr,
    };
    log::debug!(
        "Estimated key {} (correlation {:.4})",
        estimate.name(),
        best_corr
    );
    estimate
}

/// Correlate the chroma, rotated to `root`, against a key profile
fn correlate(chroma: &[f32; 12], root: u32, profile: &[f32; 12]) -> f32 {
    let mut corr = 0.0f32;
    for (i, &weight) in profile.iter().enumerate() {
        corr += chroma[(root as usize + i) % 12] * weight;
    }
    corr
}
