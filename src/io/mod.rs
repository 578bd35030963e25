//! I/O modules: the simulated request layer.

pub mod request_simulator;

// Re-export commonly used types
pub use request_simulator::RequestSimulator;
