//! Core data models for the standings engine.

mod ids;
mod standing;
mod stats;
mod tournament;

pub use ids::*;
pub use standing::*;
pub use stats::*;
pub use tournament::*;
