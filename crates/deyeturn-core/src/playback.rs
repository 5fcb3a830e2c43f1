//! Headless control surface for the watch view.
//!
//! The embedded player does the decoding and streaming; this session only
//! tracks what the controls show, decides what to tell the player, and saves
//! continue-watching progress on a fixed interval while playing. Time is
//! passed in explicitly so the caller owns the timer.

use crate::progress::ProgressSink;
use deyeturn_config::PlaybackConfig;
use deyeturn_models::{clamp_fraction, MovieId, Quality};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Shortest save cadence a session accepts; smaller intervals are raised to it.
pub const MIN_SAVE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSettings {
    pub save_interval: Duration,
    pub controls_hide_after: Duration,
    pub resume_ceiling: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self::from(&PlaybackConfig::default())
    }
}

impl From<&PlaybackConfig> for PlaybackSettings {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            save_interval: config.save_interval(),
            controls_hide_after: config.controls_hide_after(),
            resume_ceiling: config.resume_ceiling,
        }
    }
}

/// Instruction for the embedded player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    SeekTo(f64),
    SetVolume(f64),
    SetMuted(bool),
    EnterFullscreen,
    ExitFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Subtitle {
    #[default]
    Off,
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ja,
    Ko,
    Zh,
}

impl Subtitle {
    pub const ALL: [Subtitle; 10] = [
        Subtitle::Off,
        Subtitle::En,
        Subtitle::Es,
        Subtitle::Fr,
        Subtitle::De,
        Subtitle::It,
        Subtitle::Pt,
        Subtitle::Ja,
        Subtitle::Ko,
        Subtitle::Zh,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Subtitle::Off => "off",
            Subtitle::En => "en",
            Subtitle::Es => "es",
            Subtitle::Fr => "fr",
            Subtitle::De => "de",
            Subtitle::It => "it",
            Subtitle::Pt => "pt",
            Subtitle::Ja => "ja",
            Subtitle::Ko => "ko",
            Subtitle::Zh => "zh",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Subtitle::Off => "Off",
            Subtitle::En => "English",
            Subtitle::Es => "Spanish",
            Subtitle::Fr => "French",
            Subtitle::De => "German",
            Subtitle::It => "Italian",
            Subtitle::Pt => "Portuguese",
            Subtitle::Ja => "Japanese",
            Subtitle::Ko => "Korean",
            Subtitle::Zh => "Chinese",
        }
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Subtitle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Subtitle::ALL
            .iter()
            .copied()
            .find(|sub| sub.code().eq_ignore_ascii_case(s) || sub.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown subtitle track: {}", s))
    }
}

/// What a call to [`PlaybackSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tick {
    pub controls_hidden: bool,
    pub saved_progress: Option<f64>,
}

#[derive(Debug)]
pub struct PlaybackSession<P> {
    movie_id: MovieId,
    sink: P,
    settings: PlaybackSettings,
    playing: bool,
    volume: f64,
    muted: bool,
    played: f64,
    duration: f64,
    fullscreen: bool,
    controls_visible: bool,
    settings_open: bool,
    quality: Quality,
    subtitle: Subtitle,
    resumed_from: Option<f64>,
    hide_deadline: Option<Instant>,
    // None once the next save would land past what `Instant` can represent
    next_save_at: Option<Instant>,
}

impl<P: ProgressSink> PlaybackSession<P> {
    /// Start a paused session, picking up saved progress unless the movie
    /// was (nearly) finished.
    pub fn open(movie_id: MovieId, sink: P, mut settings: PlaybackSettings, now: Instant) -> Self {
        if settings.save_interval < MIN_SAVE_INTERVAL {
            warn!(
                "Save interval {:?} is too short, using {:?}",
                settings.save_interval, MIN_SAVE_INTERVAL
            );
            settings.save_interval = MIN_SAVE_INTERVAL;
        }
        let saved = sink.get_progress(movie_id);
        let resumed_from = (saved > 0.0 && saved < settings.resume_ceiling).then_some(saved);
        match resumed_from {
            Some(position) => info!("Resuming {} at {:.1}%", movie_id, position * 100.0),
            None if saved > 0.0 => debug!("Not resuming {}: saved progress {:.3} counts as finished", movie_id, saved),
            None => debug!("No saved progress for {}", movie_id),
        }
        let next_save_at = now.checked_add(settings.save_interval);
        Self {
            movie_id,
            sink,
            settings,
            playing: false,
            volume: 1.0,
            muted: false,
            played: resumed_from.unwrap_or(0.0),
            duration: 0.0,
            fullscreen: false,
            controls_visible: true,
            settings_open: false,
            quality: Quality::Auto,
            subtitle: Subtitle::Off,
            resumed_from,
            hide_deadline: None,
            next_save_at,
        }
    }

    /// Seek the player should perform once it is ready, if progress was resumed.
    pub fn resume_command(&self) -> Option<PlayerCommand> {
        self.resumed_from.map(PlayerCommand::SeekTo)
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn played(&self) -> f64 {
        self.played
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume the slider shows: zero while muted.
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn subtitle(&self) -> Subtitle {
        self.subtitle
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.played * self.duration
    }

    /// "elapsed / total" as shown next to the progress bar.
    pub fn time_label(&self) -> String {
        format!("{} / {}", format_time(self.elapsed_seconds()), format_time(self.duration))
    }

    pub fn toggle_play(&mut self, now: Instant) -> PlayerCommand {
        self.playing = !self.playing;
        if self.playing {
            if self.controls_visible {
                self.hide_deadline = self.hide_deadline_from(now);
            }
            PlayerCommand::Play
        } else {
            self.hide_deadline = None;
            PlayerCommand::Pause
        }
    }

    pub fn seek(&mut self, fraction: f64) -> PlayerCommand {
        self.played = clamp_fraction(fraction);
        PlayerCommand::SeekTo(self.played)
    }

    /// Progress callback from the player.
    pub fn on_progress(&mut self, fraction: f64) {
        self.played = clamp_fraction(fraction);
    }

    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    }

    pub fn set_volume(&mut self, volume: f64) -> [PlayerCommand; 2] {
        self.volume = clamp_fraction(volume);
        self.muted = self.volume == 0.0;
        [PlayerCommand::SetVolume(self.volume), PlayerCommand::SetMuted(self.muted)]
    }

    pub fn toggle_mute(&mut self) -> PlayerCommand {
        self.muted = !self.muted;
        PlayerCommand::SetMuted(self.muted)
    }

    pub fn toggle_fullscreen(&mut self) -> PlayerCommand {
        self.fullscreen = !self.fullscreen;
        if self.fullscreen {
            PlayerCommand::EnterFullscreen
        } else {
            PlayerCommand::ExitFullscreen
        }
    }

    /// Pointer activity reveals the controls and re-arms the hide timer.
    pub fn pointer_moved(&mut self, now: Instant) {
        self.controls_visible = true;
        if self.playing {
            self.hide_deadline = self.hide_deadline_from(now);
        }
    }

    // An unrepresentable deadline means the controls never auto-hide.
    fn hide_deadline_from(&self, now: Instant) -> Option<Instant> {
        now.checked_add(self.settings.controls_hide_after)
    }

    pub fn toggle_settings(&mut self) {
        self.settings_open = !self.settings_open;
    }

    pub fn select_quality(&mut self, quality: Quality) {
        self.quality = quality;
    }

    pub fn select_subtitle(&mut self, subtitle: Subtitle) {
        self.subtitle = subtitle;
    }

    /// Advance timers to `now`: auto-hide the controls and run the periodic save.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let mut outcome = Tick::default();

        if let Some(deadline) = self.hide_deadline {
            if self.playing && now >= deadline {
                self.controls_visible = false;
                self.settings_open = false;
                self.hide_deadline = None;
                outcome.controls_hidden = true;
            }
        }

        // Several elapsed intervals still produce a single save
        let save_due = match self.next_save_at {
            Some(due) if now >= due => {
                self.next_save_at = next_deadline(due, now, self.settings.save_interval);
                true
            }
            _ => false,
        };
        if save_due && self.playing && self.played > 0.0 {
            self.sink.update_progress(self.movie_id, self.played);
            debug!("Saved progress {:.3} for {}", self.played, self.movie_id);
            outcome.saved_progress = Some(self.played);
        }

        outcome
    }

    /// Write the current position now, regardless of the interval.
    pub fn flush(&self) -> Option<f64> {
        if self.played > 0.0 {
            self.sink.update_progress(self.movie_id, self.played);
            Some(self.played)
        } else {
            None
        }
    }
}

/// First point on the `due + k * interval` grid strictly after `now`.
fn next_deadline(due: Instant, now: Instant, interval: Duration) -> Option<Instant> {
    let behind = now.saturating_duration_since(due);
    let steps = behind.as_nanos() / interval.as_nanos().max(1) + 1;
    u32::try_from(steps)
        .ok()
        .and_then(|steps| interval.checked_mul(steps))
        .and_then(|advance| due.checked_add(advance))
        .or_else(|| now.checked_add(interval))
}

/// `m:ss`, or `h:mm:ss` from one hour up.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds.floor() as u64 } else { 0 };
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
