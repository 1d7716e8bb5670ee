//! faultline_probe
//!
//! Runs scripted components through the faultline supervisor so its
//! lifecycle behaviour can be observed from a terminal.

pub mod config;
pub mod scenarios;
