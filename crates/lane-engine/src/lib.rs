//! # lane-engine
//!
//! Deterministic lane layout for possibly-overlapping calendar entries.
//!
//! Given read-only [`EntryRef`]s and a display [`Interval`](grid_clock::Interval),
//! [`compute`] maps every entry onto the minimum number of non-overlapping
//! vertical lanes and returns per-entry day offsets, span lengths, and lane
//! indices a renderer can turn into grid geometry. The algorithm is a greedy
//! interval-graph coloring with a documented total sort order, so equal
//! inputs always produce equal output.
//!
//! ## Modules
//!
//! - [`layout`] — sort + first-fit lane assignment over day-granular spans
//! - [`types`] — the `EntryRef` input and `LayoutState` output records

pub mod layout;
pub mod types;

pub use layout::compute;
pub use types::{EntryRef, LayoutState};
