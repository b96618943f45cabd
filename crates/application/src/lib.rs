//! Tapguard Application Layer
//!
//! Ports describe the outside world the pipeline talks to; use cases hold
//! the decode/fan-out loop and the cloak-defense engine.
pub mod ports;
pub mod use_cases;
