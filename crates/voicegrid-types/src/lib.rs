//! Foundation types for VoiceGrid.
//!
//! This crate contains the platform-agnostic types shared by all VoiceGrid
//! crates: input events, content references, configuration, and error types.

pub mod config;
pub mod content;
pub mod error;
pub mod input;
