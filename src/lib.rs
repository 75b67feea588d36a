//! Quicksort visualizer core.
//!
//! ```text
//! generator → sequence → engine → trace of (snapshot, highlighted) steps → player → presentation
//! ```
//!
//! 1. [`generator`] draws the initial sequence, always including a small value.
//! 2. [`engine`] runs a Lomuto quicksort over a copy and records one [`model::Step`]
//!    per partition call.
//! 3. [`player`] replays a trace one step per tick; the host drives the ticks.
//! 4. [`session`] owns the displayed state and turns user actions into
//!    [`model::SessionEvent`]s for the presentation layer.

pub mod engine;
pub mod generator;
pub mod metrics;
pub mod model;
pub mod player;
pub mod session;
