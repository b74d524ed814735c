//! The live game: draws songs without replacement and drives the audio port.
//!
//! ```text
//! Idle -> Loading -> Playing <-> Paused
//!           |           |          |
//!           v           +----+-----+-> Idle   (clip ended)
//!        Errored -> Idle     |
//!                            +-> Stopped -> Idle   (stop)
//! ```
//!
//! All state sits behind one mutex. Events are queued while it is held and
//! handed to listeners once it is released, one at a time and in the order
//! the transitions happened. Listeners may call back into the session; what
//! they trigger is delivered after the event they are handling.

use std::{
    collections::{HashSet, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    thread::{self, ThreadId},
    time::Duration,
};

use rand::Rng;
use tokio::{runtime::Handle, task::JoinHandle, time::sleep};

use crate::{
    bingo::{
        audio::{AudioPort, ResolvedAudio},
        events::{EventBus, EventKind, SessionEvent, SubscriptionId},
    },
    config,
    error::BingoError,
    types::{PlaybackState, Song},
    warning,
};

const DEFAULT_CLIP: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Clip length for songs without a cue window.
    pub fallback_clip: Duration,
    pub auto_play: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fallback_clip: DEFAULT_CLIP,
            auto_play: true,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            fallback_clip: config::fallback_clip(),
            auto_play: config::auto_play(),
        }
    }
}

/// Read-only copy of the session state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub total_songs: usize,
    pub remaining_songs: usize,
    pub drawn_songs: usize,
    pub current_song: Option<Song>,
    pub playback_state: PlaybackState,
    pub auto_play_enabled: bool,
}

struct SessionState {
    pool: Vec<Song>,
    drawn: Vec<Song>,
    current: Option<Song>,
    playback: PlaybackState,
    auto_play: bool,
    /// Identity of the playback in flight; bumped whenever a playback starts
    /// or is abandoned.
    generation: u64,
    /// Identity of the pending clip-end timer.
    timer_token: u64,
    timer: Option<JoinHandle<()>>,
    clip_length: Duration,
    clip_remaining: Option<Duration>,
    /// Events not yet handed to listeners.
    pending: VecDeque<SessionEvent>,
}

impl SessionState {
    fn emit(&mut self, event: SessionEvent) {
        self.pending.push_back(event);
    }

    fn cancel_timer(&mut self) {
        self.timer_token += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.clip_remaining = None;
    }
}

struct Inner {
    state: Mutex<SessionState>,
    listeners: Mutex<EventBus>,
    /// Held for as long as queued events are being delivered.
    delivery: Mutex<()>,
    /// Thread currently running listeners.
    deliverer: Mutex<Option<ThreadId>>,
    audio: Arc<dyn AudioPort>,
    fallback_clip: Duration,
}

/// Clears the deliverer mark, even when a listener panics.
struct DeliveryTurn<'a>(&'a Mutex<Option<ThreadId>>);

impl Drop for DeliveryTurn<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bus(&self) -> MutexGuard<'_, EventBus> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hands queued events to listeners. Must be called without the state lock.
    ///
    /// A call made from inside a listener returns right away; the loop that
    /// is already running picks up whatever it queued.
    fn deliver(&self) {
        let me = thread::current().id();
        if *self.deliverer.lock().unwrap_or_else(PoisonError::into_inner) == Some(me) {
            return;
        }

        let _delivery = self.delivery.lock().unwrap_or_else(PoisonError::into_inner);
        *self.deliverer.lock().unwrap_or_else(PoisonError::into_inner) = Some(me);
        let _turn = DeliveryTurn(&self.deliverer);

        loop {
            let next = self.lock().pending.pop_front();
            let Some(event) = next else {
                break;
            };
            let listeners = self.bus().matching(event.kind());
            for listener in listeners {
                listener(&event);
            }
        }
    }

    /// Abandons whatever is loading, playing or paused.
    fn halt(&self, state: &mut SessionState) -> bool {
        state.cancel_timer();
        state.generation += 1;
        let was_active = matches!(
            state.playback,
            PlaybackState::Loading | PlaybackState::Playing | PlaybackState::Paused
        );
        if was_active {
            self.audio.stop();
        }
        state.playback = PlaybackState::Idle;
        was_active
    }

    fn fail(&self, state: &mut SessionState, song: Song, error: BingoError) {
        warning!("Could not play '{}': {}", song.title, error);
        state.playback = PlaybackState::Errored;
        state.emit(SessionEvent::PlaybackError {
            song,
            error: error.to_string(),
        });
        state.playback = PlaybackState::Idle;
    }

    fn finish_clip(&self, token: u64) {
        {
            let mut state = self.lock();
            if state.timer_token != token || state.playback != PlaybackState::Playing {
                return;
            }
            state.timer = None;
            state.clip_remaining = None;
            self.audio.stop();
            state.playback = PlaybackState::Idle;
            if let Some(song) = state.current.clone() {
                state.emit(SessionEvent::PlaybackEnded(song));
            }
        }
        self.deliver();
    }

    /// Second half of a playback, once the port answered.
    fn begin_clip(
        this: &Arc<Inner>,
        state: &mut SessionState,
        song: Song,
        generation: u64,
        resolved: Result<ResolvedAudio, BingoError>,
    ) -> bool {
        if state.generation != generation || state.playback != PlaybackState::Loading {
            return false;
        }

        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                this.fail(state, song, e);
                return false;
            }
        };

        if let Err(e) = this.audio.play(&resolved.url) {
            this.fail(state, song, e);
            return false;
        }

        let mut clip = song.clip_duration().unwrap_or(this.fallback_clip);
        if let Some(hint) = resolved.duration_hint.filter(|h| *h > 0.0) {
            clip = clip.min(Duration::from_secs_f64(hint));
        }

        state.playback = PlaybackState::Playing;
        state.clip_length = clip;
        Inner::schedule_clip_end(this, state, clip);
        true
    }

    fn schedule_clip_end(this: &Arc<Inner>, state: &mut SessionState, after: Duration) {
        state.cancel_timer();
        let token = state.timer_token;

        let Ok(runtime) = Handle::try_current() else {
            warning!("No async runtime available, the clip will not stop on its own");
            return;
        };

        let weak: Weak<Inner> = Arc::downgrade(this);
        state.timer = Some(runtime.spawn(async move {
            sleep(after).await;
            if let Some(inner) = weak.upgrade() {
                inner.finish_clip(token);
            }
        }));
    }
}

/// One game in progress.
///
/// Cloning gives another handle to the same session.
#[derive(Clone)]
pub struct PlaybackSession {
    inner: Arc<Inner>,
}

impl PlaybackSession {
    pub fn new(audio: Arc<dyn AudioPort>, config: SessionConfig) -> Self {
        let state = SessionState {
            pool: Vec::new(),
            drawn: Vec::new(),
            current: None,
            playback: PlaybackState::Idle,
            auto_play: config.auto_play,
            generation: 0,
            timer_token: 0,
            timer: None,
            clip_length: config.fallback_clip,
            clip_remaining: None,
            pending: VecDeque::new(),
        };

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                listeners: Mutex::new(EventBus::default()),
                delivery: Mutex::new(()),
                deliverer: Mutex::new(None),
                audio,
                fallback_clip: config.fallback_clip,
            }),
        }
    }

    /// Listens to one kind of event.
    pub fn subscribe<F>(&self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.inner.bus().on(kind, Arc::new(listener))
    }

    /// Listens to every event.
    pub fn subscribe_all<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.inner.bus().on_any(Arc::new(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.bus().off(id)
    }

    /// Starts a new game with the playable songs of `songs`.
    ///
    /// Songs without audio are left out and repeated ids are kept once.
    /// Returns the pool size.
    pub fn load_songs(&self, songs: Vec<Song>) -> usize {
        let mut seen = HashSet::new();
        let pool: Vec<Song> = songs
            .into_iter()
            .filter(|song| song.has_audio)
            .filter(|song| seen.insert(song.id.clone()))
            .collect();

        let count = {
            let mut state = self.inner.lock();
            self.inner.halt(&mut state);
            state.pool = pool;
            state.drawn.clear();
            state.current = None;

            let count = state.pool.len();
            state.emit(SessionEvent::SongsLoaded { count });
            count
        };
        self.inner.deliver();
        count
    }

    /// Draws a random song from the pool.
    ///
    /// Returns `None` and emits `BingoFinished` once the pool is empty. With
    /// auto-play on, the drawn song is played before this returns; a
    /// playback failure does not undo the draw.
    pub async fn draw_next_song(&self) -> Option<Song> {
        let (song, auto_play) = {
            let mut state = self.inner.lock();
            if state.pool.is_empty() {
                state.emit(SessionEvent::BingoFinished);
                drop(state);
                self.inner.deliver();
                return None;
            }

            if self.inner.halt(&mut state) {
                state.emit(SessionEvent::PlaybackStopped);
            }

            let index = rand::rng().random_range(0..state.pool.len());
            let song = state.pool.remove(index);
            state.drawn.push(song.clone());
            state.current = Some(song.clone());

            let remaining = state.pool.len();
            let drawn = state.drawn.len();
            state.emit(SessionEvent::SongDrawn {
                song: song.clone(),
                remaining,
                drawn,
            });
            (song, state.auto_play)
        };
        self.inner.deliver();

        if auto_play {
            if let Err(e) = self.play_current_song().await {
                warning!("Auto-play of '{}' failed: {}", song.title, e);
            }
        }

        Some(song)
    }

    /// Plays the current song's clip.
    ///
    /// `Ok(true)` once the device is playing; the clip then ends on its own
    /// after `cueOut - cueIn` seconds (or the fallback length). `Ok(false)`
    /// when no audio could be resolved (a `PlaybackError` event is emitted)
    /// or when a stop/draw/reset superseded this playback meanwhile.
    pub async fn play_current_song(&self) -> Result<bool, BingoError> {
        let (song, generation) = {
            let mut state = self.inner.lock();
            let Some(song) = state.current.clone() else {
                return Err(BingoError::NoCurrentSong);
            };
            if matches!(state.playback, PlaybackState::Loading | PlaybackState::Playing) {
                return Err(BingoError::PlaybackBusy(state.playback));
            }

            if self.inner.halt(&mut state) {
                state.emit(SessionEvent::PlaybackStopped);
            }
            state.playback = PlaybackState::Loading;
            state.emit(SessionEvent::PlaybackStarted(song.clone()));
            (song, state.generation)
        };
        self.inner.deliver();

        let resolved = self.inner.audio.resolve_playable_url(&song).await;

        let playing = {
            let mut state = self.inner.lock();
            Inner::begin_clip(&self.inner, &mut state, song, generation, resolved)
        };
        self.inner.deliver();
        Ok(playing)
    }

    /// Plays the current song again from its cue-in point.
    pub async fn replay_current_song(&self) -> Result<bool, BingoError> {
        {
            let mut state = self.inner.lock();
            if state.current.is_none() {
                return Err(BingoError::NoCurrentSong);
            }
            if state.playback == PlaybackState::Loading {
                return Err(BingoError::PlaybackBusy(state.playback));
            }
            if self.inner.halt(&mut state) {
                state.emit(SessionEvent::PlaybackStopped);
            }
        }
        self.inner.deliver();
        self.play_current_song().await
    }

    /// Pauses a playing clip; the clip-end timer is suspended with it.
    pub fn pause_playback(&self) {
        {
            let mut state = self.inner.lock();
            if state.playback != PlaybackState::Playing {
                return;
            }

            let played = Duration::from_secs_f64(self.inner.audio.elapsed().max(0.0));
            let remaining = state.clip_length.saturating_sub(played);
            state.cancel_timer();
            state.clip_remaining = Some(remaining);

            self.inner.audio.pause();
            state.playback = PlaybackState::Paused;
            state.emit(SessionEvent::PlaybackPaused);
        }
        self.inner.deliver();
    }

    /// Resumes a paused clip for whatever was left of it.
    pub fn resume_playback(&self) {
        {
            let mut state = self.inner.lock();
            if state.playback != PlaybackState::Paused {
                return;
            }

            let remaining = state.clip_remaining.take().unwrap_or(state.clip_length);
            self.inner.audio.resume();
            state.playback = PlaybackState::Playing;
            Inner::schedule_clip_end(&self.inner, &mut state, remaining);
            state.emit(SessionEvent::PlaybackResumed);
        }
        self.inner.deliver();
    }

    /// Stops the device from any state. Stopping is momentary: the session
    /// is idle again right away.
    pub fn stop_playback(&self) {
        {
            let mut state = self.inner.lock();
            state.cancel_timer();
            state.generation += 1;
            self.inner.audio.stop();
            state.playback = PlaybackState::Stopped;
            state.playback = PlaybackState::Idle;
            state.emit(SessionEvent::PlaybackStopped);
        }
        self.inner.deliver();
    }

    pub fn set_auto_play(&self, enabled: bool) {
        {
            let mut state = self.inner.lock();
            state.auto_play = enabled;
            state.emit(SessionEvent::AutoPlayChanged(enabled));
        }
        self.inner.deliver();
    }

    /// Stops playback and forgets the pool, the history and the current song.
    pub fn reset(&self) {
        self.stop_playback();

        {
            let mut state = self.inner.lock();
            state.pool.clear();
            state.drawn.clear();
            state.current = None;
            state.emit(SessionEvent::Reset);
        }
        self.inner.deliver();
    }

    pub fn state(&self) -> SessionSnapshot {
        let state = self.inner.lock();
        SessionSnapshot {
            total_songs: state.pool.len() + state.drawn.len(),
            remaining_songs: state.pool.len(),
            drawn_songs: state.drawn.len(),
            current_song: state.current.clone(),
            playback_state: state.playback,
            auto_play_enabled: state.auto_play,
        }
    }

    /// Drawn songs in draw order.
    pub fn drawn_songs(&self) -> Vec<Song> {
        self.inner.lock().drawn.clone()
    }

    pub fn drawn_ids(&self) -> Vec<String> {
        self.inner.lock().drawn.iter().map(|s| s.id.clone()).collect()
    }

    pub fn remaining_songs(&self) -> Vec<Song> {
        self.inner.lock().pool.clone()
    }

    pub fn current_song(&self) -> Option<Song> {
        self.inner.lock().current.clone()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.inner.lock().playback
    }
}
