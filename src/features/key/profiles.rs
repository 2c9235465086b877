//! Krumhansl-Schmuckler key profiles
//!
//! Reference pitch-class weightings correlated against the observed chroma
//! to find the best-fitting tonic and mode. The published coefficients are
//! used verbatim so results stay reproducible across implementations.
//!
//! # Reference
//!
//! Krumhansl, C. L. (1990). Cognitive Foundations of Musical Pitch.
//! Oxford University Press.

/// Major-key profile, indexed by semitone distance from the tonic
pub const MAJOR_PROFILE: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Minor-key profile, indexed by semitone distance from the tonic
pub const MINOR_PROFILE: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Diatonic semitone offsets of the major scale
pub const MAJOR_INTERVALS: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Diatonic semitone offsets of the natural minor scale
pub const MINOR_INTERVALS: [i32; 7] = [0, 2, 3, 5, 7, 8, 10];
