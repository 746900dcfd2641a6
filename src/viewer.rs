use crate::pitch::normalize_offset;
use crate::transpose::{transpose_with_options, TransposeOptions};
use std::borrow::Cow;

/// Largest offset the viewer will show in either direction
pub const MAX_OFFSET: i32 = 11;

/// Transposition offset dialed in by the viewer. Starts at 0 and is never
/// saved with the song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransposeControl {
    offset: i32,
}

impl TransposeControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn is_active(&self) -> bool {
        self.offset != 0
    }

    /// Jump straight to an offset, folded into [-11, 11]
    pub fn set(&mut self, offset: i32) {
        self.offset = normalize_offset(offset);
    }

    /// Step buttons: moving past +11 comes back around at -11 and vice versa
    pub fn step(&mut self, direction: i32) {
        let next = self.offset.saturating_add(direction);
        self.offset = if next > MAX_OFFSET {
            -MAX_OFFSET
        } else if next < -MAX_OFFSET {
            MAX_OFFSET
        } else {
            next
        };
    }

    /// Keyboard up: stops at +11
    pub fn nudge_up(&mut self) {
        self.offset = (self.offset + 1).min(MAX_OFFSET);
    }

    /// Keyboard down: stops at -11
    pub fn nudge_down(&mut self) {
        self.offset = (self.offset - 1).max(-MAX_OFFSET);
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// The progression as it should be displayed at the current offset
    pub fn render<'a>(&self, progression: &'a str, options: &TransposeOptions) -> Cow<'a, str> {
        if self.is_active() {
            Cow::Owned(transpose_with_options(progression, self.offset, options))
        } else {
            Cow::Borrowed(progression)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps_at_the_ends() {
        let mut control = TransposeControl::new();
        control.set(10);
        control.step(1);
        assert_eq!(control.offset(), 11);
        control.step(1);
        assert_eq!(control.offset(), -11);
        control.step(-1);
        assert_eq!(control.offset(), 11);
    }

    #[test]
    fn test_nudge_clamps() {
        let mut control = TransposeControl::new();
        for _ in 0..20 {
            control.nudge_up();
        }
        assert_eq!(control.offset(), 11);
        for _ in 0..30 {
            control.nudge_down();
        }
        assert_eq!(control.offset(), -11);
    }

    #[test]
    fn test_set_folds_large_offsets() {
        let mut control = TransposeControl::new();
        control.set(14);
        assert_eq!(control.offset(), 2);
        control.set(-12);
        assert!(!control.is_active());
    }

    #[test]
    fn test_render() {
        let options = TransposeOptions::default();
        let mut control = TransposeControl::new();
        assert!(matches!(control.render("Bb  F", &options), Cow::Borrowed("Bb  F")));

        control.step(-1);
        assert_eq!(control.render("Bb  F", &options), "A  E");

        control.reset();
        assert_eq!(control.offset(), 0);
        assert_eq!(control.render("Bb  F", &options), "Bb  F");
    }
}
