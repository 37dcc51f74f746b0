//! Input and output records for the layout engine.

use grid_clock::Clock;
use serde::{Deserialize, Serialize};

/// Read-only reference to one calendar entry, owned by the external domain
/// layer. Identity is the opaque `id`; the engine never mutates or retains
/// an EntryRef beyond a single [`compute`](crate::compute) call.
#[derive(Debug, Clone)]
pub struct EntryRef {
    /// Opaque identifier (e.g., "evt-2026-0142").
    pub id: String,
    pub start: Clock,
    pub end: Clock,
    /// All-day entries sort ahead of timed entries that start at the same
    /// instant, so they claim lanes first.
    pub all_day: bool,
}

/// Grid placement for one entry within one display window. Integer day/lane
/// units; a rendering layer maps these to pixels with its own cell size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutState {
    pub id: String,
    /// Whole-day offset from the window start, clamped to 0 for entries
    /// beginning before the window.
    pub start_pos: u32,
    /// Day units occupied inside the window, truncated at the window edge.
    /// Always at least 1.
    pub span_length: u32,
    /// Lane index. Entries sharing a lane never overlap in day range.
    pub stack_level: u32,
}
