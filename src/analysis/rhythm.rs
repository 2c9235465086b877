//! Rhythmic cleanup and grid snapping
//!
//! The final shaping pass, applied in a fixed order:
//! 1. Ghost-note removal (a second, coarser duration gate after quantization)
//! 2. Snapping of onsets and durations to the rhythmic grid
//! 3. Legato merging of near-adjacent same-pitch notes
//!
//! The merge is a single left-to-right fold into a fresh output vector; each
//! merge only ever extends the immediately preceding kept note, so one pass
//! with one "previous" pointer suffices. Running the pass on already-clean
//! input is a no-op.

use crate::config::AnalysisConfig;

use super::segmenter::RawNote;

/// Drop ghost notes, snap to the grid, and bridge legato gaps
///
/// # Arguments
///
/// * `notes` - Quantized notes in temporal order (consumed)
/// * `config` - Ghost gate, grid unit, legato gap, and merge pitch tolerance
///
/// # Returns
///
/// A fresh, time-ordered note vector. Every surviving note has a duration
/// above the ghost gate and both onset and duration on the grid.
pub fn cleanup_and_snap(notes: Vec<RawNote>, config: &AnalysisConfig) -> Vec<RawNote> {
    if notes.is_empty() {
        return notes;
    }

    let grid = config.grid_unit;

    // 1. Ghost removal, then 2. grid snapping with a one-unit duration floor.
    let snapped = notes
        .into_iter()
        .filter(|n| n.duration > config.ghost_note_duration)
        .map(|mut n| {
            n.start_time = (n.start_time / grid).round() * grid;
            n.duration = ((n.duration / grid).round() * grid).max(grid);
            n
        });

    // 3. Legato merge.
    let mut merged: Vec<RawNote> = Vec::new();
    for curr in snapped {
        let Some(prev) = merged.last_mut() else {
            merged.push(curr);
            continue;
        };

        let prev_end = prev.start_time + prev.duration;
        let gap = curr.start_time - prev_end;
        let pitch_matches =
            (prev.midi_pitch - curr.midi_pitch).abs() < config.merge_pitch_tolerance;

        if gap < config.legato_gap && pitch_matches {
            // Tiny gap at the same pitch: one held note, split by a flicker
            // of unvoiced frames. Extend the previous note to cover this one.
            prev.duration = (curr.start_time + curr.duration) - prev.start_time;
        } else if curr.start_time < prev_end && pitch_matches {
            // Snapping pushed this note inside the previous one; resolve the
            // overlap by extending to the union instead of keeping both.
            prev.duration = prev
                .duration
                .max((curr.start_time + curr.duration) - prev.start_time);
        } else {
            merged.push(curr);
        }
    }

    log::debug!("Rhythmic cleanup kept {} notes", merged.len());
    merged
}
