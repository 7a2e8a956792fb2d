//! N-body physics: softened gravity, semi-implicit Euler, bounded trails

pub mod gravity;
pub mod history;
pub mod integrator;
pub mod math;
pub mod system;

pub use history::PositionHistory;
pub use system::{NBodySystem, SystemError};
