//! Sound cues raised by the bridge
//!
//! The engine never plays audio itself. Frontends implement [`AudioSink`] and
//! hand it to the [`Bridge`](crate::Bridge).

use match3_core::TileRng;
use tracing::trace;

/// Default number of block-destruction sound variants
pub const DESTROY_VARIANTS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    SwapSuccess,
    SwapFail,
    /// One resolution step removed tiles; `variant` picks the clip
    DestroyBlocks { variant: u8 },
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

impl<S: AudioSink + ?Sized> AudioSink for &mut S {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue)
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue)
    }
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "audio muted");
    }
}

/// Keeps every cue in order, for tests and replays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingAudio {
    pub cues: Vec<Cue>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

/// Picks destroy-sound variants, never the same one twice in a row
#[derive(Debug, Clone)]
pub struct VariantPicker {
    count: u8,
    last: Option<u8>,
}

impl VariantPicker {
    pub fn new(count: u8) -> Self {
        Self { count, last: None }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// Next variant, or `None` when there are no variants at all
    pub fn pick<R: TileRng>(&mut self, rng: &mut R) -> Option<u8> {
        let variant = match (self.count, self.last) {
            (0, _) => return None,
            (1, _) => 0,
            (count, None) => rng.next_range(count as u32) as u8,
            (count, Some(last)) => {
                // Draw from the other count - 1 variants, skipping `last`.
                let v = rng.next_range(count as u32 - 1) as u8;
                if v >= last {
                    v + 1
                } else {
                    v
                }
            }
        };
        self.last = Some(variant);
        Some(variant)
    }
}

impl Default for VariantPicker {
    fn default() -> Self {
        Self::new(DESTROY_VARIANTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match3_core::{SequenceRng, SimpleRng};

    #[test]
    fn test_no_back_to_back_repeats() {
        let mut picker = VariantPicker::new(3);
        let mut rng = SimpleRng::new(9);
        let mut prev = picker.pick(&mut rng).unwrap();
        for _ in 0..500 {
            let next = picker.pick(&mut rng).unwrap();
            assert_ne!(next, prev);
            assert!(next < 3);
            prev = next;
        }
    }

    #[test]
    fn test_skip_maps_around_last() {
        // Always draws 0: first pick 0, then the skip rule moves it to 1.
        let mut picker = VariantPicker::new(3);
        let mut rng = SequenceRng::new(vec![0]);
        assert_eq!(picker.pick(&mut rng), Some(0));
        assert_eq!(picker.pick(&mut rng), Some(1));
        assert_eq!(picker.pick(&mut rng), Some(0));
    }

    #[test]
    fn test_single_and_empty_variant_sets() {
        let mut rng = SimpleRng::new(1);
        let mut one = VariantPicker::new(1);
        assert_eq!(one.pick(&mut rng), Some(0));
        assert_eq!(one.pick(&mut rng), Some(0));

        let mut none = VariantPicker::new(0);
        assert_eq!(none.pick(&mut rng), None);
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        fn play_all<S: AudioSink>(mut sink: S, cues: &[Cue]) {
            for cue in cues {
                sink.play(*cue);
            }
        }

        let mut sink = RecordingAudio::default();
        play_all(&mut sink, &[Cue::SwapFail, Cue::SwapSuccess]);
        assert_eq!(sink.cues, vec![Cue::SwapFail, Cue::SwapSuccess]);
    }
}
