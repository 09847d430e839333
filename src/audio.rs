//! Audio cues via the Web Audio API
//!
//! Procedurally generated - no media files needed. Playback failure is
//! swallowed, never surfaced to the sequence.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Boot chime when the loading bar starts
    Boot,
    /// Soft tick for an emitted typewriter character
    Keystroke,
}

pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a cue. Missing context, suspended state, or node failures all
    /// fall through silently.
    pub fn play(&self, cue: SoundCue) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume if suspended (browsers require a user gesture first)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Boot => self.play_boot(ctx, self.volume),
            SoundCue::Keystroke => self.play_keystroke(ctx, self.volume),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Boot - rising synth sweep
    fn play_boot(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(800.0, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.7).ok();
    }

    /// Keystroke - very short high blip
    fn play_keystroke(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.08, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.03)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.05).ok();
    }
}
