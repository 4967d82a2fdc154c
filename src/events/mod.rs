//! Events emitted to the presentation layer.
//!
//! ## Key Components
//!
//! - [`GameEvent`]: One observable state change
//! - [`SelectionState`]: Highlight state of a piece
//! - [`EventSink`]: Where a run sends its events
//! - [`NullSink`], [`RecordingSink`]: The provided sinks

pub mod event;
pub mod sink;

pub use event::{GameEvent, SelectionState};
pub use sink::{EventSink, NullSink, RecordingSink};
