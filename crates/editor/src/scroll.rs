// Chunk: docs/chunks/view_scroll - Cursor-following scroll state with eased animation
//!
//! Scroll arithmetic for a view over uniform-height lines.
//!
//! `ScrollState` tracks two pixel offsets: `target_scroll_offset`, where the
//! view wants to be, and `scroll_offset`, where it is drawn. `tick` eases the
//! drawn offset toward the target so that cursor-following scrolls animate.
//!
//! The window is computed from the *target* offset, so repeated cursor
//! movements during an animation keep extending the same scroll instead of
//! compounding against a half-finished one.

use std::ops::Range;

/// Below this distance in pixels the animation snaps to the target.
const SNAP_EPSILON_PX: f32 = 0.5;

/// Scroll state for one view.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Offset in pixels at which the view is currently drawn
    scroll_offset: f32,
    /// Offset in pixels the view is easing toward
    target_scroll_offset: f32,
    /// Number of lines that fit in the viewport; at least 1
    visible_lines: usize,
    /// Height of each line in pixels
    row_height: f32,
    /// Exponential easing rate per second; 0 disables animation
    smoothing: f32,
}

impl ScrollState {
    pub fn new(row_height: f32, visible_lines: usize, smoothing: f32) -> Self {
        Self {
            scroll_offset: 0.0,
            target_scroll_offset: 0.0,
            visible_lines: visible_lines.max(1),
            row_height,
            smoothing,
        }
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn visible_lines(&self) -> usize {
        self.visible_lines
    }

    /// Returns the drawn scroll offset in pixels.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Returns the scroll offset the view is easing toward.
    pub fn target_scroll_offset(&self) -> f32 {
        self.target_scroll_offset
    }

    /// Returns true while the drawn offset has not reached the target.
    pub fn is_animating(&self) -> bool {
        self.scroll_offset != self.target_scroll_offset
    }

    /// Updates the viewport size in lines.
    pub fn set_visible_lines(&mut self, visible_lines: usize) {
        self.visible_lines = visible_lines.max(1);
    }

    /// First line of the target window: `floor(target / row_height)`.
    pub fn first_line(&self) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        (self.target_scroll_offset / self.row_height).floor() as usize
    }

    /// Last line of the target window.
    pub fn last_line(&self) -> usize {
        self.first_line() + self.visible_lines - 1
    }

    /// Lines to draw at the current (animated) offset.
    ///
    /// Includes one extra line for the partially visible row at the bottom.
    pub fn visible_range(&self, line_count: usize) -> Range<usize> {
        let first = if self.row_height > 0.0 {
            (self.scroll_offset / self.row_height).floor() as usize
        } else {
            0
        };
        let start = first.min(line_count);
        start..(first + self.visible_lines + 1).min(line_count)
    }

    /// Keeps `line` inside the target window.
    ///
    /// Scrolling down only moves the target and is animated by `tick`.
    /// Scrolling up snaps both offsets to the line. Returns true if the target
    /// moved.
    pub fn follow_line(&mut self, line: usize) -> bool {
        let first = self.first_line();
        let last = self.last_line();

        if line > last {
            let new_first = line + 1 - self.visible_lines;
            self.target_scroll_offset = new_first as f32 * self.row_height;
            true
        } else if line < first {
            self.target_scroll_offset = line as f32 * self.row_height;
            self.scroll_offset = self.target_scroll_offset;
            true
        } else {
            false
        }
    }

    /// Moves the target by `dy` pixels (mouse wheel), clamped to the content.
    pub fn scroll_by(&mut self, dy: f32, line_count: usize) {
        let max_lines = line_count.saturating_sub(self.visible_lines);
        let max_offset = max_lines as f32 * self.row_height;
        self.target_scroll_offset = (self.target_scroll_offset + dy).clamp(0.0, max_offset);
    }

    /// Advances the animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.is_animating() {
            return;
        }
        let distance = self.target_scroll_offset - self.scroll_offset;
        if self.smoothing <= 0.0 || distance.abs() <= SNAP_EPSILON_PX {
            self.scroll_offset = self.target_scroll_offset;
            return;
        }
        let t = 1.0 - (-self.smoothing * dt.max(0.0)).exp();
        self.scroll_offset += distance * t;
        if (self.target_scroll_offset - self.scroll_offset).abs() <= SNAP_EPSILON_PX {
            self.scroll_offset = self.target_scroll_offset;
        }
    }
}
