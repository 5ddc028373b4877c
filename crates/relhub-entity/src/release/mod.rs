//! Release domain entities.

pub mod model;
pub mod phase;

pub use model::Release;
pub use phase::ReleasePhase;
