//! Audio output
//!
//! The game drives audio through `AudioPlayer` and never depends on a real
//! device. `SilentAudio` keeps the mixer state and logs what would play,
//! which is what the headless binary and the tests use.

use serde::{Deserialize, Serialize};

/// Background music
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Track {
    /// Title screen loop
    Menu,
    /// In-game loop
    Battle,
}

impl Track {
    pub fn as_str(&self) -> &'static str {
        match self {
            Track::Menu => "menu",
            Track::Battle => "battle",
        }
    }
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Lasso leaves the hand
    Throw,
    /// Lasso wraps a ball
    Catch,
    /// Points awarded
    Score,
    /// Gas planet reached the basket
    HazardHit,
    GameOver,
}

pub trait AudioPlayer {
    /// Start a looping track, replacing whatever is playing
    fn play_loop(&mut self, track: Track);

    fn stop(&mut self);

    /// Master volume, clamped to 0.0 - 1.0
    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    /// Fire and forget
    fn play_effect(&mut self, _effect: SoundEffect) {}
}

/// Audio sink that only tracks state
#[derive(Debug, Clone)]
pub struct SilentAudio {
    track: Option<Track>,
    volume: f32,
    muted: bool,
    effects_played: usize,
}

impl Default for SilentAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl SilentAudio {
    pub fn new() -> Self {
        Self {
            track: None,
            volume: 0.8,
            muted: false,
            effects_played: 0,
        }
    }

    pub fn current_track(&self) -> Option<Track> {
        self.track
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub fn effects_played(&self) -> usize {
        self.effects_played
    }
}

impl AudioPlayer for SilentAudio {
    fn play_loop(&mut self, track: Track) {
        if self.track == Some(track) {
            return;
        }
        log::info!("Music: {}", track.as_str());
        self.track = Some(track);
    }

    fn stop(&mut self) {
        if let Some(track) = self.track.take() {
            log::info!("Music stopped ({})", track.as_str());
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn play_effect(&mut self, effect: SoundEffect) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        self.effects_played += 1;
        log::debug!("Sfx: {:?}", effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamped() {
        let mut audio = SilentAudio::new();
        audio.set_volume(1.5);
        assert_eq!(audio.volume(), 1.0);
        audio.set_volume(-0.2);
        assert_eq!(audio.volume(), 0.0);
        audio.set_volume(f32::NAN);
        assert_eq!(audio.volume(), 0.0);
    }

    #[test]
    fn test_loop_and_stop() {
        let mut audio = SilentAudio::new();
        audio.play_loop(Track::Menu);
        audio.play_loop(Track::Battle);
        assert_eq!(audio.current_track(), Some(Track::Battle));
        audio.stop();
        assert_eq!(audio.current_track(), None);
        audio.stop();
    }

    #[test]
    fn test_mute_silences_effects() {
        let mut audio = SilentAudio::new();
        audio.play_effect(SoundEffect::Catch);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.play_effect(SoundEffect::Score);
        assert_eq!(audio.effects_played(), 1);
    }
}
