//! Event sinks.
//!
//! A run owns one sink and calls `emit` for every event, fire-and-forget.
//! `NullSink` drops everything; `RecordingSink` keeps events for tests,
//! replays and headless tools.

use super::event::GameEvent;

/// Receiver of presentation events.
pub trait EventSink {
    /// Handle one event. Must not call back into the run.
    fn emit(&mut self, event: GameEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Keeps every event in order.
///
/// ```
/// use lineup_engine::events::{EventSink, GameEvent, RecordingSink};
///
/// let mut sink = RecordingSink::new();
/// sink.emit(GameEvent::ScoreChanged { score: 30 });
///
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.take(), vec![GameEvent::ScoreChanged { score: 30 }]);
/// assert!(sink.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<GameEvent>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events matching a predicate.
    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    /// Most recent event matching a predicate.
    pub fn last_matching(&self, predicate: impl Fn(&GameEvent) -> bool) -> Option<&GameEvent> {
        self.events.iter().rev().find(|e| predicate(e))
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceId;

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.emit(GameEvent::PieceRemoved { piece: PieceId(1) });
        sink.emit(GameEvent::ScoreChanged { score: 5 });
        sink.emit(GameEvent::PieceRemoved { piece: PieceId(2) });

        assert_eq!(sink.count(|e| matches!(e, GameEvent::PieceRemoved { .. })), 2);
        assert_eq!(
            sink.last_matching(|e| matches!(e, GameEvent::PieceRemoved { .. })),
            Some(&GameEvent::PieceRemoved { piece: PieceId(2) })
        );
        assert_eq!(sink.events()[1], GameEvent::ScoreChanged { score: 5 });
    }

    #[test]
    fn test_sink_through_reference() {
        fn fire(mut sink: impl EventSink) {
            sink.emit(GameEvent::RunEnded { victory: true });
        }

        let mut sink = RecordingSink::new();
        fire(&mut sink);
        fire(&mut NullSink);

        assert_eq!(sink.events(), &[GameEvent::RunEnded { victory: true }]);
    }
}
