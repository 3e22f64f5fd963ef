//! Read-only view of the animation driver's current frame.
//!
//! Advancing frames, pacing and looping belong to the host's animation
//! driver. This crate only asks it which frame to show.

use std::cell::Cell;

/// Exposes the frame index the driver currently wants displayed.
pub trait AnimationCursor {
    /// Current frame index (0-based)
    fn current_frame(&self) -> usize;
}

/// A fixed frame.
impl AnimationCursor for usize {
    #[inline]
    fn current_frame(&self) -> usize {
        *self
    }
}

/// A frame index the driver updates in place.
impl AnimationCursor for Cell<usize> {
    #[inline]
    fn current_frame(&self) -> usize {
        self.get()
    }
}

impl<T: AnimationCursor + ?Sized> AnimationCursor for &T {
    #[inline]
    fn current_frame(&self) -> usize {
        (**self).current_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_cursor() {
        assert_eq!(4usize.current_frame(), 4);
    }

    #[test]
    fn test_cell_cursor_tracks_driver() {
        let cursor = Cell::new(0usize);
        let by_ref = &cursor;
        assert_eq!(by_ref.current_frame(), 0);

        cursor.set(7);
        assert_eq!(by_ref.current_frame(), 7);
    }
}
