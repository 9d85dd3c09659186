//! Loading placeholder animation.
//!
//! The modal shows a spinner in place of its rows while a loader is pending.
//! Each spinner has a unique id and an internal tag; tick messages for another
//! spinner, or stale ticks from an earlier loop, are ignored so the animation
//! never speeds up when extra ticks are scheduled.
//!
//! ```rust
//! use bubbletea_list_modal::spinner::{Model, LINE};
//!
//! let spinner = Model::new().with_spinner(LINE.clone());
//! assert_eq!(spinner.view(), "|");
//! assert_eq!(spinner.tick_msg().id, spinner.id());
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Animation frames and frame interval.
#[derive(Debug, Clone)]
pub struct Spinner {
    /// Frames to cycle through.
    pub frames: Vec<String>,
    /// Delay between frames.
    pub fps: Duration,
}

impl Spinner {
    /// Creates a spinner from frames and an interval.
    pub fn new(frames: Vec<String>, fps: Duration) -> Self {
        Self { frames, fps }
    }
}

fn frames(f: &[&str]) -> Vec<String> {
    f.iter().map(|s| s.to_string()).collect()
}

/// `| / - \`
pub static LINE: Lazy<Spinner> =
    Lazy::new(|| Spinner::new(frames(&["|", "/", "-", "\\"]), Duration::from_millis(100)));

/// Braille dots.
pub static MINI_DOT: Lazy<Spinner> = Lazy::new(|| {
    Spinner::new(
        frames(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        Duration::from_millis(83),
    )
});

/// Growing ellipsis.
pub static ELLIPSIS: Lazy<Spinner> =
    Lazy::new(|| Spinner::new(frames(&["", ".", "..", "..."]), Duration::from_millis(333)));

/// Message that advances a spinner by one frame.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Spinner this tick belongs to.
    pub id: i64,
    tag: i64,
}

/// Spinner state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Active animation.
    pub spinner: Spinner,
    /// Style applied to each frame.
    pub style: Style,
    frame: usize,
    id: i64,
    tag: i64,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a spinner using [`MINI_DOT`].
    pub fn new() -> Self {
        Self {
            spinner: MINI_DOT.clone(),
            style: Style::new(),
            frame: 0,
            id: next_id(),
            tag: 0,
        }
    }

    /// Replaces the animation.
    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self.frame = 0;
        self
    }

    /// Replaces the frame style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Unique id used to route ticks.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// A tick addressed to this spinner's current loop.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Schedules the next frame.
    pub fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.spinner.fps, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Starts a new tick loop. Ticks still scheduled by the previous loop are
    /// ignored when they arrive.
    pub fn restart(&mut self) -> Cmd {
        self.tag += 1;
        self.tick()
    }

    /// Advances the animation on a matching tick and schedules the next one.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;
        if tick.id != self.id || tick.tag != self.tag {
            return None;
        }

        self.frame = (self.frame + 1) % self.spinner.frames.len().max(1);
        self.tag += 1;
        Some(self.tick())
    }

    /// Current frame, styled.
    pub fn view(&self) -> String {
        match self.spinner.frames.get(self.frame) {
            Some(frame) => self.style.render(frame),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Model::new().id(), Model::new().id());
    }

    #[tokio::test]
    async fn test_frames_wrap() {
        let mut spinner = Model::new().with_spinner(LINE.clone());
        for expected in ["|", "/", "-", "\\", "|"] {
            assert_eq!(spinner.view(), expected);
            let tick = spinner.tick_msg();
            assert!(spinner.update(Box::new(tick)).is_some());
        }
    }

    #[tokio::test]
    async fn test_foreign_and_stale_ticks_are_ignored() {
        let mut spinner = Model::new().with_spinner(LINE.clone());
        let other = Model::new();
        assert!(spinner.update(Box::new(other.tick_msg())).is_none());

        let stale = spinner.tick_msg();
        let current = spinner.tick_msg();
        spinner.update(Box::new(current));
        assert!(spinner.update(Box::new(stale)).is_none());
        assert_eq!(spinner.view(), "/");
    }

    #[tokio::test]
    async fn test_restart_invalidates_pending_ticks() {
        let mut spinner = Model::new().with_spinner(LINE.clone());
        let pending = spinner.tick_msg();
        let _next = spinner.restart();

        assert!(spinner.update(Box::new(pending)).is_none());
        assert_eq!(spinner.view(), "|");
        assert!(spinner.update(Box::new(spinner.tick_msg())).is_some());
        assert_eq!(spinner.view(), "/");
    }
}
