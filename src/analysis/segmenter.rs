//! Note segmentation
//!
//! Groups consecutive smoothed frames into discrete notes. A state machine
//! keeps one open accumulator: voiced frames within the pitch tolerance
//! extend it, a pitch jump or a voicing drop closes it. Notes shorter than
//! the minimum duration are discarded at close time.

use crate::config::AnalysisConfig;
use crate::features::frame::Frame;
use crate::features::pitch::midi_from_frequency;

/// A segmented note before quantization and rhythmic cleanup
///
/// Carries the raw fractional pitch; the harmonic quantizer and the rhythmic
/// cleanup pass reshape these before finalization into
/// [`Note`](crate::analysis::result::Note)s.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNote {
    /// Onset in seconds (recording coordinates)
    pub start_time: f32,

    /// Duration in seconds
    pub duration: f32,

    /// Fractional MIDI pitch (duration-weighted average over the note's frames)
    pub midi_pitch: f32,

    /// Loudness in [0, 1], from the opening frame's RMS
    pub velocity: f32,

    /// Highest frame confidence seen over the note's span
    pub confidence: f32,
}

/// Open note accumulator
struct Accumulator {
    start_time: f32,
    duration: f32,
    midi_pitch: f32,
    velocity: f32,
    confidence: f32,
}

impl Accumulator {
    fn open(frame: &Frame, midi_pitch: f32, frame_duration: f32) -> Self {
        Self {
            start_time: frame.time,
            duration: frame_duration,
            midi_pitch,
            velocity: (frame.volume * 5.0).min(1.0),
            confidence: frame.confidence,
        }
    }

    /// Extend with one more frame, blending the pitch toward the running
    /// duration-weighted average rather than snapping to the newest estimate.
    fn extend(&mut self, midi_pitch: f32, confidence: f32, frame_duration: f32) {
        let total = self.duration + frame_duration;
        self.midi_pitch =
            (self.midi_pitch * self.duration + midi_pitch * frame_duration) / total;
        self.duration = total;
        self.confidence = self.confidence.max(confidence);
    }

    fn close(self, min_duration: f32, notes: &mut Vec<RawNote>) {
        if self.duration >= min_duration {
            notes.push(RawNote {
                start_time: self.start_time,
                duration: self.duration,
                midi_pitch: self.midi_pitch,
                velocity: self.velocity,
                confidence: self.confidence,
            });
        }
    }
}

/// Segment smoothed frames into notes
///
/// # Arguments
///
/// * `frames` - Smoothed frames in temporal order
/// * `frame_duration` - Nominal duration of one frame (hop / sample rate)
/// * `config` - Pitch tolerance and minimum note duration
///
/// # Returns
///
/// Non-overlapping notes in temporal order; every note's duration is at
/// least `config.min_note_duration`.
pub fn segment_notes(
    frames: &[Frame],
    frame_duration: f32,
    config: &AnalysisConfig,
) -> Vec<RawNote> {
    let mut notes = Vec::new();
    let mut current: Option<Accumulator> = None;

    for frame in frames {
        if frame.frequency <= 0.0 {
            if let Some(acc) = current.take() {
                acc.close(config.min_note_duration, &mut notes);
            }
            continue;
        }

        let midi_pitch = midi_from_frequency(frame.frequency);

        let extended = match current.as_mut() {
            Some(acc) if (acc.midi_pitch - midi_pitch).abs() < config.pitch_tolerance => {
                acc.extend(midi_pitch, frame.confidence, frame_duration);
                true
            }
            _ => false,
        };

        if !extended {
            // Pitch jump (or no running note): close whatever is open and
            // start over at the current frame's pitch.
            if let Some(acc) = current.take() {
                acc.close(config.min_note_duration, &mut notes);
            }
            current = Some(Accumulator::open(frame, midi_pitch, frame_duration));
        }
    }

    if let Some(acc) = current.take() {
        acc.close(config.min_note_duration, &mut notes);
    }

    log::debug!("Segmented {} notes from {} frames", notes.len(), frames.len());
    notes
}
