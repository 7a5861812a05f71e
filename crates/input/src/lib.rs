// Chunk: docs/chunks/input_events - Shared input types crate
//!
//! Input event types for keyboard and scroll handling.
//!
//! These types abstract over whatever windowing layer delivers the events and
//! give the view layer a small, platform-free vocabulary to dispatch on.

/// A keyboard event.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// The key that was pressed
    pub key: Key,
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a new KeyEvent with the given key and modifiers.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Creates a KeyEvent for a key with no modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::default())
    }

    /// Creates a KeyEvent for a single character with no modifiers.
    pub fn char(ch: char) -> Self {
        Self::plain(Key::Char(ch))
    }

    /// Creates a KeyEvent with shift held, for extending a selection.
    pub fn shifted(key: Key) -> Self {
        Self::new(key, Modifiers::SHIFT)
    }

    /// Creates a KeyEvent with control held, for word-wise movement.
    pub fn with_control(key: Key) -> Self {
        Self::new(key, Modifiers::CONTROL)
    }
}

/// Modifier keys that can be held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key
    pub shift: bool,
    /// Control key
    pub control: bool,
    /// Alt / Option key
    pub alt: bool,
}

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        control: false,
        alt: false,
    };

    pub const CONTROL: Modifiers = Modifiers {
        shift: false,
        control: true,
        alt: false,
    };

    /// Returns true if no modifier keys are held.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt
    }

    /// Returns true if only shift is held (for uppercase letters).
    pub fn is_shift_only(&self) -> bool {
        self.shift && !self.control && !self.alt
    }
}

/// Keys that can be pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (already accounts for shift state)
    Char(char),
    /// Backspace / Delete backward
    Backspace,
    /// Forward delete
    Delete,
    /// Return / Enter
    Return,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
    Escape,
    PageUp,
    PageDown,
}

/// Scroll delta from trackpad or mouse wheel, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollDelta {
    /// Horizontal scroll amount (positive = right)
    pub dx: f32,
    /// Vertical scroll amount (positive = down)
    pub dy: f32,
}

impl ScrollDelta {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// A purely vertical scroll.
    pub fn vertical(dy: f32) -> Self {
        Self { dx: 0.0, dy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(KeyEvent::char('a').key, Key::Char('a'));
        assert!(KeyEvent::char('a').modifiers.is_empty());
        assert!(KeyEvent::shifted(Key::Left).modifiers.is_shift_only());
        assert!(KeyEvent::with_control(Key::Right).modifiers.control);
    }

    #[test]
    fn test_scroll_delta_vertical() {
        let delta = ScrollDelta::vertical(-3.0);
        assert_eq!(delta.dx, 0.0);
        assert_eq!(delta.dy, -3.0);
    }
}
