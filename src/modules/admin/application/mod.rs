mod admin_gate;
pub mod ports;

pub use admin_gate::{AdminGate, AdminGateError};
