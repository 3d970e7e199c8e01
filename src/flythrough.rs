//! Playback cursor over a path trace.
//!
//! Pure state only: which frame the flythrough is on, how many frames each
//! tick skips, and whether it is playing. The embedder drives ticks from
//! its own timer and forwards the emitted transport messages over its
//! channel; nothing here performs I/O.

use std::fmt;

/// A textual transport message for the external audio process.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportMessage {
    Play,
    Stop,
    Value(f64),
}

impl fmt::Display for TransportMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMessage::Play => write!(f, "Play"),
            TransportMessage::Stop => write!(f, "Stop"),
            TransportMessage::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Advances a frame cursor over a trace of `len` points.
///
/// Frame indices address camera frames, so the last valid index is
/// `len − 2`: the final trace point only ever serves as a look-at target.
#[derive(Clone, Debug)]
pub struct Flythrough {
    len: usize,
    cursor: usize,
    skip: usize,
    playing: bool,
}

impl Flythrough {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            cursor: 0,
            skip: 0,
            playing: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Jump to `frame`, clamped to the valid frame range.
    pub fn set_cursor(&mut self, frame: usize) {
        self.cursor = frame.min(self.last_frame());
    }

    /// Extra frames consumed per tick on top of the single advance.
    pub fn set_skip(&mut self, skip: usize) {
        self.skip = skip;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start playback.
    pub fn play(&mut self) -> TransportMessage {
        self.playing = true;
        TransportMessage::Play
    }

    /// Stop playback.
    pub fn stop(&mut self) -> TransportMessage {
        self.playing = false;
        TransportMessage::Stop
    }

    fn last_frame(&self) -> usize {
        self.len.saturating_sub(2)
    }

    /// One looping tick: advance by `skip + 1` frames, wrapping past the
    /// last frame back to the start. Returns the new cursor.
    pub fn advance(&mut self) -> usize {
        let next = self.cursor + self.skip + 1;
        self.cursor = if next > self.last_frame() { 0 } else { next };
        self.cursor
    }

    /// One linear tick: advance a single frame, or stop at the end. The
    /// `Stop` message is emitted exactly once, on the tick that hits the
    /// end of the trace.
    pub fn advance_once(&mut self) -> Option<TransportMessage> {
        if self.cursor < self.last_frame() {
            self.cursor += 1;
            None
        } else if self.playing {
            Some(self.stop())
        } else {
            None
        }
    }
}
