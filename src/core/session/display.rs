//=========================================================================
// Display Sinks
//=========================================================================
//
// Two-line status output written by the session: the time line and the
// points line. Rendering is someone else's job; sinks only receive text.
//
// Sinks:
//   TextDisplay     keeps the latest strings in memory
//   ChannelDisplay  forwards DisplayUpdates to another thread
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::warn;

//=== Text Formatting =====================================================

/// Formats the time line as `Time remaining: {minutes}:{seconds}`.
///
/// Minutes are floored; seconds keep their fractional part and carry the
/// sign of `remaining_secs`.
pub fn format_time_remaining(remaining_secs: f64) -> String {
    let minutes = (remaining_secs / 60.0).floor() as i64;
    let seconds = remaining_secs % 60.0;
    format!("Time remaining: {}:{}", minutes, seconds)
}

/// Formats the points line as `Points: {current}/{max}`.
pub fn format_points(current: u32, max: u32) -> String {
    format!("Points: {}/{}", current, max)
}

//=== DisplaySink =========================================================

/// Receiver of the session's status text.
pub trait DisplaySink {
    /// Replaces the time line.
    fn set_time_text(&mut self, text: &str);

    /// Replaces the points line.
    fn set_points_text(&mut self, text: &str);
}

//=== TextDisplay =========================================================

/// In-memory display holding the most recent text of each line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDisplay {
    time: String,
    points: String,
}

impl TextDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_text(&self) -> &str {
        &self.time
    }

    pub fn points_text(&self) -> &str {
        &self.points
    }
}

impl DisplaySink for TextDisplay {
    fn set_time_text(&mut self, text: &str) {
        self.time.clear();
        self.time.push_str(text);
    }

    fn set_points_text(&mut self, text: &str) {
        self.points.clear();
        self.points.push_str(text);
    }
}

//=== ChannelDisplay ======================================================

/// A line change forwarded by [`ChannelDisplay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayUpdate {
    Time(String),
    Points(String),
}

/// Display that forwards every change to a render thread.
///
/// Repeated identical text is not re-sent. If the receiver is dropped the
/// display logs one warning and keeps accepting text.
pub struct ChannelDisplay {
    sender: Sender<DisplayUpdate>,
    last: TextDisplay,
    disconnected: bool,
}

impl ChannelDisplay {
    pub fn new(sender: Sender<DisplayUpdate>) -> Self {
        Self {
            sender,
            last: TextDisplay::new(),
            disconnected: false,
        }
    }

    /// Latest text of both lines, as last written.
    pub fn current(&self) -> &TextDisplay {
        &self.last
    }

    fn forward(&mut self, update: DisplayUpdate) {
        if self.disconnected {
            return;
        }
        if self.sender.send(update).is_err() {
            warn!("Display receiver disconnected, further updates are dropped");
            self.disconnected = true;
        }
    }
}

impl DisplaySink for ChannelDisplay {
    fn set_time_text(&mut self, text: &str) {
        if self.last.time_text() == text {
            return;
        }
        self.last.set_time_text(text);
        self.forward(DisplayUpdate::Time(text.to_owned()));
    }

    fn set_points_text(&mut self, text: &str) {
        if self.last.points_text() == text {
            return;
        }
        self.last.set_points_text(text);
        self.forward(DisplayUpdate::Points(text.to_owned()));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
