use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::{error::BingoError, info, types::Song};

/// A playable location for a song.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAudio {
    pub url: String,
    /// Length of the audio behind `url` in seconds, when the provider knows it.
    pub duration_hint: Option<f64>,
}

/// The playback device used by a session.
///
/// Resolution may suspend (it usually talks to a provider); the control
/// calls are immediate signals to the device.
#[async_trait]
pub trait AudioPort: Send + Sync {
    async fn resolve_playable_url(&self, song: &Song) -> Result<ResolvedAudio, BingoError>;

    fn play(&self, url: &str) -> Result<(), BingoError>;

    fn pause(&self);

    fn resume(&self);

    fn stop(&self);

    /// Seconds played since the last `play`, pauses excluded.
    fn elapsed(&self) -> f64;
}

#[derive(Default)]
struct PlayClock {
    started: Option<Instant>,
    accumulated: Duration,
}

impl PlayClock {
    fn elapsed(&self) -> Duration {
        self.accumulated + self.started.map(|s| s.elapsed()).unwrap_or_default()
    }
}

/// Audio port backed by what the library already stores for a song.
///
/// A stored `audioUrl` wins; otherwise a YouTube watch URL starting at the
/// cue-in point is built from `youtubeId`. There is no sound device behind
/// this port: control calls are announced on the console and only the
/// elapsed time is tracked.
pub struct CatalogAudioPort {
    announce: bool,
    clock: Mutex<PlayClock>,
}

impl CatalogAudioPort {
    pub fn new() -> Self {
        Self {
            announce: true,
            clock: Mutex::new(PlayClock::default()),
        }
    }

    pub fn quiet() -> Self {
        Self {
            announce: false,
            clock: Mutex::new(PlayClock::default()),
        }
    }

    fn with_clock<T>(&self, f: impl FnOnce(&mut PlayClock) -> T) -> T {
        let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut clock)
    }
}

impl Default for CatalogAudioPort {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioPort for CatalogAudioPort {
    async fn resolve_playable_url(&self, song: &Song) -> Result<ResolvedAudio, BingoError> {
        let unresolved = |reason: &str| BingoError::AudioResolution {
            song_id: song.id.clone(),
            reason: reason.to_string(),
        };

        if !song.has_audio {
            return Err(unresolved("song is marked as having no audio"));
        }

        let duration_hint = (song.duration_seconds > 0.0).then_some(song.duration_seconds);

        if let Some(url) = song.audio_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(ResolvedAudio {
                url: url.to_string(),
                duration_hint,
            });
        }

        if let Some(video_id) = song.youtube_id.as_deref().filter(|v| !v.trim().is_empty()) {
            return Ok(ResolvedAudio {
                url: format!(
                    "https://www.youtube.com/watch?v={}&t={}s",
                    video_id,
                    song.cue_in.max(0.0).floor() as u64
                ),
                duration_hint,
            });
        }

        Err(unresolved("no audio source stored for this song"))
    }

    fn play(&self, url: &str) -> Result<(), BingoError> {
        self.with_clock(|clock| {
            clock.accumulated = Duration::ZERO;
            clock.started = Some(Instant::now());
        });
        if self.announce {
            info!("Playing {}", url);
        }
        Ok(())
    }

    fn pause(&self) {
        self.with_clock(|clock| {
            if let Some(started) = clock.started.take() {
                clock.accumulated += started.elapsed();
            }
        });
    }

    fn resume(&self) {
        self.with_clock(|clock| {
            if clock.started.is_none() {
                clock.started = Some(Instant::now());
            }
        });
    }

    fn stop(&self) {
        self.with_clock(|clock| *clock = PlayClock::default());
    }

    fn elapsed(&self) -> f64 {
        self.with_clock(|clock| clock.elapsed().as_secs_f64())
    }
}
