//! Harmonic quantization
//!
//! Snaps each note's fractional pitch onto the chromatic grid, pulling
//! near-boundary out-of-key pitches to the closest in-scale neighbor. Strong
//! out-of-key notes are preserved as chromatic: quantization only resolves
//! ambiguous cases, it never force-corrects a note the player clearly meant.

use crate::features::key::KeyEstimate;

use super::segmenter::RawNote;

/// Maximum distance (in semitones) from the unrounded pitch at which an
/// in-scale neighbor replaces an out-of-scale rounding
const CORRECTION_RADIUS: f32 = 0.4;

/// Quantize note pitches against an estimated key
///
/// Each pitch is rounded to the nearest semitone. If the rounded pitch class
/// is diatonic in the key it stands; otherwise the semitone neighbors are
/// searched for the in-scale candidate closest to the *original* fractional
/// pitch, which is adopted only within [`CORRECTION_RADIUS`].
///
/// # Arguments
///
/// * `notes` - Segmented notes (consumed; a fresh vector is returned)
/// * `key` - Key estimate for the segment
pub fn quantize_to_key(notes: Vec<RawNote>, key: &KeyEstimate) -> Vec<RawNote> {
    let intervals = key.scale.intervals();
    let root = key.root as i32;

    notes
        .into_iter()
        .map(|mut note| {
            let raw = note.midi_pitch;
            let rounded = raw.round();
            let pitch_class = (rounded as i32 - root).rem_euclid(12);

            if intervals.contains(&pitch_class) {
                note.midi_pitch = rounded;
                return note;
            }

            let mut best_candidate = rounded;
            let mut min_dist = f32::MAX;
            for offset in -1..=1i32 {
                let candidate = rounded + offset as f32;
                let candidate_class = (candidate as i32 - root).rem_euclid(12);
                if intervals.contains(&candidate_class) {
                    let dist = (raw - candidate).abs();
                    if dist < min_dist {
                        min_dist = dist;
                        best_candidate = candidate;
                    }
                }
            }

            note.midi_pitch = if min_dist < CORRECTION_RADIUS {
                best_candidate
            } else {
                rounded
            };
            note
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::key::Scale;

    fn c_major() -> KeyEstimate {
        KeyEstimate {
            root: 0,
            scale: Scale::Major,
            confidence: 0.8,
        }
    }

    fn note(midi_pitch: f32) -> RawNote {
        RawNote {
            start_time: 0.0,
            duration: 0.25,
            midi_pitch,
            velocity: 0.8,
            confidence: 0.9,
        }
    }

    fn quantize_one(pitch: f32, key: &KeyEstimate) -> f32 {
        quantize_to_key(vec![note(pitch)], key)[0].midi_pitch
    }

    #[test]
    fn test_in_scale_pitch_rounds() {
        // Quarter-tone sharp of middle C snaps straight onto C.
        assert_eq!(quantize_one(60.3, &c_major()), 60.0);
    }

    #[test]
    fn test_strong_out_of_key_note_preserved() {
        // 60.9 rounds to C# (out of scale in C major). The in-scale
        // neighbors C (distance 0.9) and D (distance 1.1) are both beyond
        // the correction radius, so the chromatic C# stands.
        assert_eq!(quantize_one(60.9, &c_major()), 61.0);
    }

    #[test]
    fn test_out_of_key_roundings_keep_chromatic_pitch() {
        // Any pitch that rounds out of scale sits at least 0.5 from both
        // semitone neighbors, so the in-scale correction radius never
        // reaches and the chromatic rounding stands.
        assert_eq!(quantize_one(61.4, &c_major()), 61.0); // C#
        assert_eq!(quantize_one(60.6, &c_major()), 61.0); // C#
        assert_eq!(quantize_one(62.55, &c_major()), 63.0); // D#
        assert_eq!(quantize_one(63.45, &c_major()), 63.0); // D#
    }

    #[test]
    fn test_in_scale_roundings_stand() {
        assert_eq!(quantize_one(61.7, &c_major()), 62.0); // D
        assert_eq!(quantize_one(63.62, &c_major()), 64.0); // E
        assert_eq!(quantize_one(66.9, &c_major()), 67.0); // G
    }

    #[test]
    fn test_minor_scale_membership() {
        let a_minor = KeyEstimate {
            root: 9,
            scale: Scale::Minor,
            confidence: 0.8,
        };
        // G# (pitch class 11 relative to A) is not in natural minor; G is.
        // 68.2 rounds to 68 (G#); G at 67 is 1.2 away: chromatic stands.
        assert_eq!(quantize_one(68.2, &a_minor), 68.0);
        // 69.3 rounds to A, the tonic.
        assert_eq!(quantize_one(69.3, &a_minor), 69.0);
    }

    #[test]
    fn test_duration_velocity_untouched() {
        let input = note(60.3);
        let output = &quantize_to_key(vec![input.clone()], &c_major())[0];
        assert_eq!(output.duration, input.duration);
        assert_eq!(output.velocity, input.velocity);
        assert_eq!(output.confidence, input.confidence);
        assert_eq!(output.start_time, input.start_time);
    }

    #[test]
    fn test_empty_notes() {
        assert!(quantize_to_key(Vec::new(), &c_major()).is_empty());
    }
}
