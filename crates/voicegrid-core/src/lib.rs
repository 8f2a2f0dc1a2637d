//! VoiceGrid core engine.
//!
//! Platform-agnostic navigation engine for the grid-and-speech browser:
//! the 3x3 spatial input controller, the speech-completion autonavigation
//! monitor, the autoplay scheduler, and the generic paged-collection
//! helper. This crate performs no I/O of its own; time advances only
//! through `tick(dt_ms)` calls from the host loop, and the only external
//! capability it consumes is the speech seam.

// Re-exports from voicegrid-types (foundation types).
pub use voicegrid_types::config;
pub use voicegrid_types::content;
pub use voicegrid_types::error;
pub use voicegrid_types::input;

pub use voicegrid_speech as speech;

pub mod autonav;
pub mod autoplay;
pub mod grid;
pub mod pager;
