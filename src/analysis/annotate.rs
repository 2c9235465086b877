//! Note annotation for display and export
//!
//! Attaches spelled note names, octaves, and cent offsets to finalized
//! notes. Annotation is a separate stage from transcription: the pipeline's
//! [`Note`]s stay minimal, and consumers that only need pitches never pay
//! for the strings.

use serde::{Deserialize, Serialize};

use super::result::Note;

const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A note enriched with display-oriented fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedNote {
    /// The underlying transcribed note
    pub note: Note,

    /// Spelled pitch name with sharps (e.g. "C#", "A")
    pub note_name: String,

    /// Scientific pitch octave (C4 = middle C)
    pub octave: i32,

    /// Deviation of the note's pitch from its rounded semitone, in cents
    pub cent_offset: f32,
}

/// Annotate finalized notes with names, octaves, and cent offsets
///
/// Notes with a non-finite pitch are labeled "?" rather than dropped, so the
/// output stays aligned with the input.
pub fn annotate(notes: &[Note]) -> Vec<AnnotatedNote> {
    notes
        .iter()
        .map(|note| {
            if !note.midi_pitch.is_finite() {
                return AnnotatedNote {
                    note: note.clone(),
                    note_name: "?".to_string(),
                    octave: 0,
                    cent_offset: 0.0,
                };
            }

            let rounded = note.midi_pitch.round();
            let semitone = (rounded as i32).rem_euclid(12) as usize;
            let octave = (rounded as i32).div_euclid(12) - 1;
            let cent_offset = (note.midi_pitch - rounded) * 100.0;

            AnnotatedNote {
                note: note.clone(),
                note_name: NOTE_NAMES_SHARP[semitone].to_string(),
                octave,
                cent_offset,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(midi_pitch: f32) -> Note {
        Note {
            id: "note_0_0".to_string(),
            start_time: 0.0,
            duration: 0.25,
            midi_pitch,
            velocity: 0.8,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_middle_c() {
        let annotated = annotate(&[note(60.0)]);
        assert_eq!(annotated[0].note_name, "C");
        assert_eq!(annotated[0].octave, 4);
        assert_eq!(annotated[0].cent_offset, 0.0);
    }

    #[test]
    fn test_accidental_and_octave() {
        let annotated = annotate(&[note(70.0)]);
        assert_eq!(annotated[0].note_name, "A#");
        assert_eq!(annotated[0].octave, 4);

        let annotated = annotate(&[note(21.0)]);
        assert_eq!(annotated[0].note_name, "A");
        assert_eq!(annotated[0].octave, 0);
    }

    #[test]
    fn test_cent_offset_sign() {
        let annotated = annotate(&[note(60.2), note(59.9)]);
        assert!((annotated[0].cent_offset - 20.0).abs() < 1e-3);
        assert_eq!(annotated[0].note_name, "C");
        assert!((annotated[1].cent_offset - (-10.0)).abs() < 1e-3);
        assert_eq!(annotated[1].note_name, "C");
    }

    #[test]
    fn test_non_finite_pitch_labeled_unknown() {
        let annotated = annotate(&[note(f32::NAN)]);
        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].note_name, "?");
    }
}
