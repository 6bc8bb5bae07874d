//! Completion notification.
//!
//! The session machine calls [`Notifier::play_sound`] once per finished
//! interval and never lets a failure escape: playback problems are logged and
//! the timer carries on.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;
use crate::storage::PomodoroSettings;

/// Volume used when the configured value is unusable.
const FALLBACK_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    #[default]
    Digital,
    Bell1,
    Bell2,
    Beep,
}

impl SoundType {
    pub const ALL: [SoundType; 4] = [
        SoundType::Digital,
        SoundType::Bell1,
        SoundType::Bell2,
        SoundType::Beep,
    ];

    pub fn asset_path(self) -> &'static str {
        match self {
            SoundType::Digital => "/sound/digital.mp3",
            SoundType::Bell1 => "/sound/bell1.mp3",
            SoundType::Bell2 => "/sound/bell2.mp3",
            SoundType::Beep => "/sound/beep.mp3",
        }
    }

    /// Number of terminal bells rung for this sound.
    fn bell_count(self) -> usize {
        match self {
            SoundType::Digital | SoundType::Beep => 1,
            SoundType::Bell1 => 2,
            SoundType::Bell2 => 3,
        }
    }
}

/// Map a 0-100 percentage to 0.0-1.0, clamping out-of-range input.
/// Non-finite input falls back to half volume.
pub fn normalize_volume(percent: f64) -> f32 {
    if !percent.is_finite() {
        tracing::warn!("invalid sound volume {percent}, using {FALLBACK_VOLUME}");
        return FALLBACK_VOLUME;
    }
    (percent / 100.0).clamp(0.0, 1.0) as f32
}

pub trait Notifier: Send {
    /// Play the completion sound. Fire-and-forget from the caller's side.
    fn play_sound(&self) -> Result<(), NotifyError>;

    /// Pick up new volume/sound settings.
    fn apply_settings(&mut self, _settings: &PomodoroSettings) {}
}

/// Rings the terminal bell on stderr.
#[derive(Debug, Clone)]
pub struct TerminalBell {
    volume: f32,
    sound: SoundType,
}

impl TerminalBell {
    pub fn from_settings(settings: &PomodoroSettings) -> Self {
        Self {
            volume: normalize_volume(f64::from(settings.sound_volume)),
            sound: settings.sound_type,
        }
    }
}

impl Notifier for TerminalBell {
    fn play_sound(&self) -> Result<(), NotifyError> {
        if self.volume <= 0.0 {
            tracing::debug!("notification muted");
            return Ok(());
        }
        let mut stderr = std::io::stderr().lock();
        for _ in 0..self.sound.bell_count() {
            stderr.write_all(b"\x07")?;
        }
        stderr.flush()?;
        Ok(())
    }

    fn apply_settings(&mut self, settings: &PomodoroSettings) {
        *self = Self::from_settings(settings);
    }
}

/// Does nothing. Used by tests and headless drivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn play_sound(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}
