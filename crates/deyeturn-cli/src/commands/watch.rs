use super::Context;
use crate::output::{percent, Output};
use color_eyre::Result;
use deyeturn_core::{format_time, PlaybackSession, PlaybackSettings, PlayerCommand, ProgressSink, Subtitle, Tick};
use deyeturn_models::{MovieId, NewWatch};
use serde_json::json;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct WatchOptions {
    pub seconds: u64,
    pub runtime: u32,
    pub tick_ms: u64,
    pub subtitle: Option<Subtitle>,
    pub title: Option<String>,
    /// Start even when the auto-play preference is off
    pub play: bool,
}

pub async fn run_watch(id: MovieId, options: WatchOptions, ctx: &Context, output: &Output) -> Result<()> {
    let profile = ctx.open_profile()?;
    let preferences = profile.preferences().get_preferences();
    let settings = PlaybackSettings::from(&ctx.config.playback);

    let start = Instant::now();
    let mut session = PlaybackSession::open(id, profile.progress(), settings, start);
    session.set_duration(f64::from(options.runtime) * 60.0);
    session.select_quality(preferences.preferred_quality);
    if let Some(subtitle) = options.subtitle {
        session.select_subtitle(subtitle);
    }

    if let Some(PlayerCommand::SeekTo(position)) = session.resume_command() {
        output.info(format!("Resuming at {}", format_time(position * session.duration())));
    }
    if !starts_playing(preferences.auto_play, options.play) {
        output.json(&json!({
            "movieId": id,
            "playing": false,
            "played": session.played(),
            "position": session.time_label(),
        }));
        output.warn("Auto-play is off. Pass --play to start playback");
        return Ok(());
    }
    session.toggle_play(start);
    info!(
        "Watching {} ({} quality, subtitles {})",
        id,
        session.quality(),
        session.subtitle()
    );

    let mut interval = (options.tick_ms > 0)
        .then(|| tokio::time::interval(Duration::from_millis(options.tick_ms)));
    let mut saves = 0usize;
    let mut elapsed = 0u64;

    while elapsed < options.seconds && session.played() < 1.0 {
        if let Some(interval) = interval.as_mut() {
            interval.tick().await;
        }
        elapsed += 1;
        let tick = play_one_second(&mut session, start + Duration::from_secs(elapsed));

        if tick.controls_hidden {
            debug!("Controls hidden at {}", session.time_label());
        }
        if let Some(saved) = tick.saved_progress {
            saves += 1;
            output.info(format!("{}  saved {}", session.time_label(), percent(saved)));
        }
    }

    session.toggle_play(start + Duration::from_secs(elapsed));
    let flushed = session.flush();
    let played = session.played();

    if let Some(title) = options.title {
        profile.history().record_watch(NewWatch {
            movie_id: id,
            title,
            thumbnail: String::new(),
            progress: played,
        });
    }

    output.json(&json!({
        "movieId": id,
        "played": played,
        "position": session.time_label(),
        "periodicSaves": saves,
        "savedProgress": flushed,
        "quality": session.quality().as_str(),
        "subtitle": session.subtitle().code(),
    }));
    output.success(format!("Stopped at {} ({})", session.time_label(), percent(played)));

    Ok(())
}

fn starts_playing(auto_play: bool, play_requested: bool) -> bool {
    auto_play || play_requested
}

/// Advance the simulated player by one second of media time.
fn play_one_second<P: ProgressSink>(session: &mut PlaybackSession<P>, now: Instant) -> Tick {
    let step = if session.duration() > 0.0 { 1.0 / session.duration() } else { 0.0 };
    session.on_progress((session.played() + step).min(1.0));
    session.tick(now)
}
