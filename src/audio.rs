//! Audio
//!
//! The simulation never waits on audio: frames emit `GameEvent`s and the
//! sink turns them into fire-and-forget sounds. On wasm the sounds and the
//! background loop are synthesised with the Web Audio API, no files needed.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Difficulty picked or round restarted
    MenuSelect,
    /// Player hit traffic
    Crash,
}

impl SoundEffect {
    /// Sound triggered by a game event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::DifficultySelected(_) | GameEvent::Restarted => {
                Some(SoundEffect::MenuSelect)
            }
            GameEvent::Crashed { .. } => Some(SoundEffect::Crash),
            GameEvent::Paused | GameEvent::Resumed => None,
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    /// Keep the background music stream fed; called once per rendered frame
    fn update_music(&mut self) {}
}

/// Play the sounds for a frame's events
pub fn play_events(sink: &mut impl AudioSink, events: &[GameEvent]) {
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        sink.play(effect);
    }
}

/// Sink for headless runs
#[derive(Debug, Default)]
pub struct NullAudio {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for NullAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx: {:?}", effect);
        self.played.push(effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::config::AudioLevels;

    /// Bass line for the background loop (Hz, one note per step)
    const MUSIC_NOTES: [f32; 16] = [
        110.0, 110.0, 164.8, 110.0, 146.8, 110.0, 164.8, 196.0, 98.0, 98.0, 146.8, 98.0, 130.8,
        98.0, 146.8, 164.8,
    ];
    /// Seconds per music step
    const MUSIC_STEP: f64 = 0.2;
    /// How far ahead notes are scheduled
    const MUSIC_LOOKAHEAD: f64 = 0.5;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        levels: AudioLevels,
        music_step: usize,
        next_note_time: f64,
    }

    impl AudioManager {
        pub fn new(levels: AudioLevels) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                levels,
                music_step: 0,
                next_note_time: 0.0,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn volume(level: f32) -> f32 {
            level.clamp(0.0, 1.0)
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
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

        /// Menu select - two rising blips
        fn play_select(ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [660.0, 990.0].into_iter().enumerate() {
                let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Square) else {
                    return;
                };
                let start = t + i as f64 * 0.06;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.25, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.05)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.06).ok();
            }
        }

        /// Crash - falling sawtooth over a low thump
        fn play_crash(ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = Self::create_osc(ctx, 220.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                    .ok();
                osc.frequency().set_value_at_time(220.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(30.0, t + 0.45)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.5).ok();
            }

            // Metal crunch
            if let Some((osc, gain)) = Self::create_osc(ctx, 900.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.frequency().set_value_at_time(900.0, t).ok();
                osc.frequency().set_value_at_time(400.0, t + 0.03).ok();
                osc.frequency().set_value_at_time(1200.0, t + 0.06).ok();
                osc.frequency().set_value_at_time(250.0, t + 0.09).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.18).ok();
            }

            if let Some((osc, gain)) = Self::create_osc(ctx, 55.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }

        fn schedule_note(ctx: &AudioContext, freq: f32, at: f64, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Triangle) else {
                return;
            };
            gain.gain().set_value_at_time(vol, at).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, at + MUSIC_STEP * 0.9)
                .ok();
            osc.start_with_when(at).ok();
            osc.stop_with_when(at + MUSIC_STEP).ok();
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::MenuSelect => {
                    let vol = Self::volume(self.levels.select_volume);
                    if vol > 0.0 {
                        Self::play_select(ctx, vol);
                    }
                }
                SoundEffect::Crash => {
                    let vol = Self::volume(self.levels.crash_volume);
                    if vol > 0.0 {
                        Self::play_crash(ctx, vol);
                    }
                }
            }
        }

        fn update_music(&mut self) {
            let vol = Self::volume(self.levels.music_volume);
            let Some(ctx) = &self.ctx else { return };
            if vol <= 0.0 || ctx.state() != web_sys::AudioContextState::Running {
                return;
            }

            let now = ctx.current_time();
            // Fell behind (tab hidden, context resumed): restart the bar
            if self.next_note_time < now {
                self.next_note_time = now + 0.05;
            }
            while self.next_note_time < now + MUSIC_LOOKAHEAD {
                let freq = MUSIC_NOTES[self.music_step % MUSIC_NOTES.len()];
                Self::schedule_note(ctx, freq, self.next_note_time, vol);
                self.next_note_time += MUSIC_STEP;
                self.music_step += 1;
            }
        }
    }
}
