//! Input model: the stroke gesture state machine.
//!
//! A stroke is the gesture between pointer-down and pointer-up. The active
//! variant carries the position the next segment will start from, so the
//! engine can rasterize incrementally without retaining stroke history.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;

/// The stroke gesture being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    /// No stroke in progress; waiting for the next pointer-down.
    Idle,
    /// A stroke is in progress.
    Drawing {
        /// Surface-local position of the stroke anchor or the most recently
        /// drawn segment end; the start of the next segment.
        last: Point,
    },
}

impl StrokeState {
    /// Whether a stroke is currently in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}

impl Default for StrokeState {
    fn default() -> Self {
        Self::Idle
    }
}
