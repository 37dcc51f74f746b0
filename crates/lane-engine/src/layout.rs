//! Greedy interval-graph coloring over day-granular entry spans.
//!
//! Sorts entries into a total, stable order, then assigns each to the first
//! lane whose occupancy ends at or before the entry's clipped start offset.
//! Overlapping entries never share a lane, the lane count is minimal for the
//! greedy order, and identical inputs always produce identical output.

use std::collections::BTreeMap;

use grid_clock::Interval;

use crate::types::{EntryRef, LayoutState};

/// Assign every entry a clipped `[start_pos, start_pos + span_length)` day
/// range and a lane within the display window.
///
/// The placement order is a total order: start instant ascending, then
/// all-day entries before timed ones, then end instant descending (wider
/// entries claim lanes first), then id ascending as the final stable
/// tie-break for entries with identical start and end.
///
/// Day ranges are half-open: an entry ending on the day another starts
/// frees its lane for that entry. Entries crossing a window boundary are
/// truncated for layout purposes, never dropped; an entry with
/// `start == end` still occupies exactly one day unit. The engine does not
/// filter entries lying outside the window — callers pre-filter. Each call
/// recomputes from scratch and returns a fresh map the caller owns.
pub fn compute(entries: &[EntryRef], window: &Interval) -> BTreeMap<String, LayoutState> {
    // Window length in day units, inclusive of both endpoints' dates.
    let window_len = window.start().diff_days(window.end()) + 1;

    let mut ordered: Vec<&EntryRef> = entries.iter().collect();
    ordered.sort_by(|a, b| {
        a.start
            .get_time()
            .cmp(&b.start.get_time())
            .then_with(|| b.all_day.cmp(&a.all_day))
            .then_with(|| b.end.get_time().cmp(&a.end.get_time()))
            .then_with(|| a.id.cmp(&b.id))
    });

    // laneEnd[i]: day offset through which lane i is occupied.
    let mut lane_end: Vec<i64> = Vec::new();
    let mut placed = BTreeMap::new();

    for entry in ordered {
        let raw_start = window.start().diff_days(&entry.start);
        let raw_end = window.start().diff_days(&entry.end);

        let start_pos = raw_start.max(0);
        // Half-open span clipped to the window; a zero-length entry still
        // occupies one day unit.
        let span_length = (raw_end - start_pos).min(window_len - start_pos).max(1);

        let lane = match lane_end.iter().position(|&through| through <= start_pos) {
            Some(i) => i,
            None => {
                lane_end.push(0);
                lane_end.len() - 1
            }
        };
        lane_end[lane] = start_pos + span_length;

        placed.insert(
            entry.id.clone(),
            LayoutState {
                id: entry.id.clone(),
                start_pos: start_pos as u32,
                span_length: span_length as u32,
                stack_level: lane as u32,
            },
        );
    }

    placed
}
