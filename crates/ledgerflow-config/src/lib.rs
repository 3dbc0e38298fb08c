//! Ledgerflow Config
//!
//! This crate contains the mode definitions for ledgerflow. A mode (Share,
//! License, Firm-Share, Co-op-Share) determines the fixed event vocabulary a
//! simulated run emits, the delay profile per event, and which events produce
//! a user-visible notification.
//!
//! These types describe what a real backend would eventually emit for each
//! sharing workflow - they are static protocol descriptions, not values
//! computed from user input. The runtime takes a `ModeDef` plus validated
//! `StartParams` and drives the run.

mod def;
mod event;
mod mode;
mod params;

pub use def::{DEFAULT_DELAY_MS, MINT_DELAY_MS, ModeDef, SETTLE_DELAY_MS};
pub use event::EventName;
pub use mode::Mode;
pub use params::{ParamError, StartParams};
