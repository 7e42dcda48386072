//! Domain models for the chairside system.

mod appointment;
mod medicine;
mod patient;
mod record;
mod shopping;

pub use appointment::*;
pub use medicine::*;
pub use patient::*;
pub use record::*;
pub use shopping::*;
