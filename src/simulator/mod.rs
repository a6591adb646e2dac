#![allow(clippy::module_inception)]
/// Load testing simulator for code execution APIs.
pub mod availability;
pub mod config;
pub mod simulator;
