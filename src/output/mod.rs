//! Parsing of stdout into progress events
//!
//! Every parser owns a [`LineBuffer`] so that a line split across two pipe
//! reads is parsed once, whole, after the second read arrives. Parsers are
//! created per invocation and never shared.
//!
//! ```
//! use sevenz_cmd::output::{OutputParser, ProgressParser};
//!
//! let mut parser = ProgressParser::extraction();
//! let mut names = Vec::new();
//! for chunk in ["- dir/a.t", "xt\n- b.txt\n"] {
//!     for event in parser.parse_chunk(chunk) {
//!         names.push(event.name);
//!     }
//! }
//! names.extend(parser.finish().into_iter().map(|e| e.name));
//! assert_eq!(names.len(), 2);
//! ```

mod lines;
mod listing;
mod progress;

pub use lines::LineBuffer;
pub use listing::ListingParser;
pub use progress::{NoProgress, ProgressParser};

use tokio::sync::mpsc;

/// Incremental stdout parser for one operation
pub trait OutputParser {
    /// Event type produced by this parser
    type Event;

    /// Parse one chunk of stdout text
    ///
    /// Complete lines are parsed immediately; an unterminated tail is kept
    /// until the next chunk (or [`OutputParser::finish`]) completes it.
    fn parse_chunk(&mut self, chunk: &str) -> Vec<Self::Event>;

    /// Parse whatever is left once stdout has closed
    fn finish(&mut self) -> Vec<Self::Event>;
}

/// Receiver of progress events
///
/// Implemented for closures and for tokio unbounded channel senders.
pub trait ProgressSink<E> {
    /// Deliver one event
    fn emit(&mut self, event: E);
}

impl<E, F> ProgressSink<E> for F
where
    F: FnMut(E),
{
    fn emit(&mut self, event: E) {
        self(event)
    }
}

impl<E> ProgressSink<E> for mpsc::UnboundedSender<E> {
    fn emit(&mut self, event: E) {
        // A dropped receiver only means nobody is listening anymore
        self.send(event).ok();
    }
}
