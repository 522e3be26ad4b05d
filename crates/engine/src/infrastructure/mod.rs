//! Infrastructure layer - concrete adapters behind the ports.

pub mod clock;
pub mod config;
pub mod memory;
pub mod ports;
pub mod telemetry;
