//! Application-level orchestration.
//!
//! This module owns the session lifecycle (input, sorting, reset) and the replay
//! cadence. UI layers send commands in and receive session events back, keeping the
//! presentation free of session state.

mod controller;

pub(crate) use controller::{run_controller, UiCommand};
