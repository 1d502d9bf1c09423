//! Platform abstraction layer
//!
//! Bridges the host to the simulation:
//! - Key names to held controls and one-shot triggers
//! - Display frame time to fixed simulation ticks

pub mod clock;
pub mod input;

pub use clock::FixedStep;
pub use input::{Control, InputState, Key};
