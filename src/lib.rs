//! Synthetic control-room backend for an automated news radio station.
//!
//! [`core::backend::ControlRoom`] owns the observable state store and drives
//! it from weighted random generators, a segment scheduler and operator
//! commands. [`core::lifecycle`] runs the generators on independent timers.

pub mod core;
pub mod logging;
