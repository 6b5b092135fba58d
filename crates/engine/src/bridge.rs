//! Presentation bridge - paces resolution steps and raises sound cues
//!
//! The core resolves a whole cascade synchronously. The bridge queues the
//! returned steps and releases them one at a time, either on demand
//! ([`Bridge::next_step`]) or on a timer ([`Bridge::tick`]). Each released step
//! is acknowledged to the session, which unlocks once the queue is empty.

use std::collections::VecDeque;

use match3_core::types::{Direction, Move, Pos, STEP_INTERVAL_MS};
use match3_core::{Rejection, ResolutionStep, Result, Session, SimpleRng, SwapOutcome, TileRng};
use tracing::debug;

use crate::audio::{AudioSink, Cue, NullAudio, VariantPicker};

pub struct Bridge<A: AudioSink = NullAudio, R: TileRng = SimpleRng> {
    session: Session<R>,
    audio: A,
    variants: VariantPicker,
    /// Separate stream so sound choices never shift tile spawns
    audio_rng: SimpleRng,
    queue: VecDeque<ResolutionStep>,
    step_interval_ms: u32,
    timer_ms: u32,
}

impl<A: AudioSink, R: TileRng> Bridge<A, R> {
    pub fn new(session: Session<R>, audio: A) -> Self {
        let audio_rng = SimpleRng::new(session.config().seed);
        Self {
            session,
            audio,
            variants: VariantPicker::default(),
            audio_rng,
            queue: VecDeque::new(),
            step_interval_ms: STEP_INTERVAL_MS,
            timer_ms: 0,
        }
    }

    pub fn with_step_interval(mut self, ms: u32) -> Self {
        self.step_interval_ms = ms;
        self
    }

    pub fn with_destroy_variants(mut self, count: u8) -> Self {
        self.variants = VariantPicker::new(count);
        self
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn into_parts(self) -> (Session<R>, A) {
        (self.session, self.audio)
    }

    /// Steps waiting to be played
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn is_busy(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn hint(&self) -> Option<Move> {
        self.session.hint()
    }

    /// Swipe from `pos` toward `dir`
    pub fn swap(&mut self, pos: Pos, dir: Direction) -> Result<SwapOutcome> {
        let outcome = self.session.swap_toward(pos, dir)?;
        self.announce(&outcome);
        Ok(outcome)
    }

    pub fn swap_cells(&mut self, a: Pos, b: Pos) -> Result<SwapOutcome> {
        let outcome = self.session.attempt_swap(a, b)?;
        self.announce(&outcome);
        Ok(outcome)
    }

    fn announce(&mut self, outcome: &SwapOutcome) {
        if outcome.accepted {
            self.audio.play(Cue::SwapSuccess);
            self.queue.extend(outcome.steps.iter().cloned());
            self.timer_ms = 0;
            debug!(queued = self.queue.len(), "steps queued for playback");
            return;
        }
        match outcome.rejection {
            Some(Rejection::NoMatch) => self.audio.play(Cue::SwapFail),
            // Input while busy or off the edge stays silent.
            reason => debug!(?reason, "swap ignored"),
        }
    }

    /// Play the next queued step right away
    pub fn next_step(&mut self) -> Option<ResolutionStep> {
        let step = self.queue.pop_front()?;
        if let Some(variant) = self.variants.pick(&mut self.audio_rng) {
            self.audio.play(Cue::DestroyBlocks { variant });
        }
        let state = self.session.tick_animation_complete();
        debug!(chain = step.chain, ?state, "step played");
        Some(step)
    }

    /// Advance the playback clock. Releases at most one step per call;
    /// leftover time carries into the next call.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<ResolutionStep> {
        if self.queue.is_empty() {
            return None;
        }
        self.timer_ms = self.timer_ms.saturating_add(elapsed_ms);
        if self.timer_ms < self.step_interval_ms {
            return None;
        }
        self.timer_ms -= self.step_interval_ms;
        self.next_step()
    }

    /// Play every queued step immediately
    pub fn drain(&mut self) -> Vec<ResolutionStep> {
        let mut played = Vec::with_capacity(self.queue.len());
        while let Some(step) = self.next_step() {
            played.push(step);
        }
        self.timer_ms = 0;
        played
    }
}
