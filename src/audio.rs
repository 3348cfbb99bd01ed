//! Synthesized UI sound cues (Web Audio, no asset files).
//!
//! Each cue is a short square-wave beep built on demand from an
//! `AudioContext`. Capability is probed by simply attempting construction;
//! any failure (unsupported runtime, autoplay policy) leaves the cue silent.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

/// The named cues the screen can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Select,
    Hover,
    Back,
}

impl Cue {
    /// Resolve an external cue name; unknown names map to `None`.
    pub fn from_name(name: &str) -> Option<Cue> {
        match name {
            "select" => Some(Cue::Select),
            "hover" => Some(Cue::Hover),
            "back" => Some(Cue::Back),
            _ => None,
        }
    }

    pub fn frequency_hz(self) -> f32 {
        match self {
            Cue::Select => 800.0,
            Cue::Hover => 1200.0,
            Cue::Back => 400.0,
        }
    }

    pub fn duration_secs(self) -> f64 {
        match self {
            Cue::Select => 0.1,
            Cue::Hover => 0.05,
            Cue::Back => 0.1,
        }
    }
}

/// Sound cue player. Stateless today (every beep builds a fresh context),
/// but owned as a component so the interaction handlers share one instance.
#[derive(Default)]
pub struct SoundBank;

impl SoundBank {
    pub fn new() -> Self {
        Self
    }

    /// Cues are cosmetic: a runtime without audio stays silent, no error
    /// reaches the caller.
    pub fn play(&self, cue: Cue) {
        let _ = beep(cue.frequency_hz(), cue.duration_secs());
    }

    /// Play by external name. Unknown names are a no-op.
    pub fn play_named(&self, name: &str) {
        if let Some(cue) = Cue::from_name(name) {
            self.play(cue);
        }
    }
}

fn beep(frequency: f32, duration: f64) -> Result<(), JsValue> {
    // Construction failing IS the capability probe.
    let ctx = AudioContext::new()?;
    let oscillator = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    oscillator.set_type(OscillatorType::Square);
    oscillator.frequency().set_value(frequency);

    let now = ctx.current_time();
    gain.gain().set_value_at_time(0.1, now)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, now + duration)?;

    oscillator.start_with_when(now)?;
    oscillator.stop_with_when(now + duration)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_names_round_trip() {
        assert_eq!(Cue::from_name("select"), Some(Cue::Select));
        assert_eq!(Cue::from_name("hover"), Some(Cue::Hover));
        assert_eq!(Cue::from_name("back"), Some(Cue::Back));
    }

    #[test]
    fn unknown_cue_name_is_none() {
        assert_eq!(Cue::from_name("explosion"), None);
        assert_eq!(Cue::from_name(""), None);
        assert_eq!(Cue::from_name("SELECT"), None);
    }

    #[test]
    fn cue_table_matches_the_screen_design() {
        assert_eq!(Cue::Select.frequency_hz(), 800.0);
        assert_eq!(Cue::Hover.frequency_hz(), 1200.0);
        assert_eq!(Cue::Back.frequency_hz(), 400.0);
        assert_eq!(Cue::Select.duration_secs(), 0.1);
        assert_eq!(Cue::Hover.duration_secs(), 0.05);
        assert_eq!(Cue::Back.duration_secs(), 0.1);
    }

    #[test]
    fn playing_an_unknown_name_is_a_no_op() {
        // Must not panic or touch the (absent) audio runtime.
        SoundBank::new().play_named("no-such-cue");
    }
}
