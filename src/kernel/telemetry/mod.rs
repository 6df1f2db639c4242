//! Game telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside decision logic (Reactor, Matcher or Round).
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain what the player said.
//! Only ids, states, counts and durations are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;
