use std::sync::Arc;

use crate::types::Song;

/// Lifecycle notifications of a [`PlaybackSession`](super::PlaybackSession).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SongsLoaded { count: usize },
    SongDrawn { song: Song, remaining: usize, drawn: usize },
    PlaybackStarted(Song),
    PlaybackEnded(Song),
    PlaybackPaused,
    PlaybackResumed,
    PlaybackStopped,
    PlaybackError { song: Song, error: String },
    /// The pool is exhausted.
    BingoFinished,
    AutoPlayChanged(bool),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SongsLoaded,
    SongDrawn,
    PlaybackStarted,
    PlaybackEnded,
    PlaybackPaused,
    PlaybackResumed,
    PlaybackStopped,
    PlaybackError,
    BingoFinished,
    AutoPlayChanged,
    Reset,
}

impl SessionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SessionEvent::SongsLoaded { .. } => EventKind::SongsLoaded,
            SessionEvent::SongDrawn { .. } => EventKind::SongDrawn,
            SessionEvent::PlaybackStarted(_) => EventKind::PlaybackStarted,
            SessionEvent::PlaybackEnded(_) => EventKind::PlaybackEnded,
            SessionEvent::PlaybackPaused => EventKind::PlaybackPaused,
            SessionEvent::PlaybackResumed => EventKind::PlaybackResumed,
            SessionEvent::PlaybackStopped => EventKind::PlaybackStopped,
            SessionEvent::PlaybackError { .. } => EventKind::PlaybackError,
            SessionEvent::BingoFinished => EventKind::BingoFinished,
            SessionEvent::AutoPlayChanged(_) => EventKind::AutoPlayChanged,
            SessionEvent::Reset => EventKind::Reset,
        }
    }
}

pub type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of listeners.
///
/// The bus only keeps the registrations. Callers take the matching
/// listeners out with [`EventBus::matching`] and run them after releasing
/// whatever lock guards the bus.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Option<EventKind>, Listener)>,
}

impl EventBus {
    /// Registers a listener for a single kind of event.
    pub fn on(&mut self, kind: EventKind, listener: Listener) -> SubscriptionId {
        self.add(Some(kind), listener)
    }

    /// Registers a listener for every event.
    pub fn on_any(&mut self, listener: Listener) -> SubscriptionId {
        self.add(None, listener)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Listeners interested in `kind`, in registration order.
    pub fn matching(&self, kind: EventKind) -> Vec<Listener> {
        self.listeners
            .iter()
            .filter(|(_, filter, _)| filter.is_none_or(|k| k == kind))
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn add(&mut self, kind: Option<EventKind>, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, listener));
        id
    }
}
