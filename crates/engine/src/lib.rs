//! Presentation-side glue for the match-3 core.
//!
//! Pacing of resolution steps and sound cues live here so the core stays free
//! of timing and audio concerns.

pub mod audio;
pub mod bridge;

pub use audio::{AudioSink, Cue, NullAudio, RecordingAudio, VariantPicker, DESTROY_VARIANTS};
pub use bridge::Bridge;
