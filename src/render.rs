//! Draw commands for the host renderer.
//!
//! [`draw_command`] chains classification, sheet resolution and frame
//! geometry into the four values a renderer needs. [`SpriteView`] wraps it
//! for a render loop, pulling the screen width and frame index from the
//! host's collaborators and remembering the last result.

use crate::geometry::{
    compute_destination_offset, compute_source_rect, compute_source_rect_checked, GeometryResult,
};
use crate::screen::{classify, ScreenCategory, ScreenWidthProvider};
use crate::{AnimationCursor, FrameRect, FrameSize, Offset, SheetDefinition, SpriteSpec, Viewport};

/// Everything a renderer needs to blit one frame.
///
/// This is a platform-agnostic description of the draw call. Each host
/// maps it onto its own drawing API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCommand<H> {
    /// Sheet image to read from
    pub image: H,
    /// Frame rectangle within the sheet
    pub source: FrameRect,
    /// Top-left corner of the frame within the viewport
    pub destination: Offset,
    /// Size to draw the frame at
    pub destination_size: FrameSize,
}

/// Build the draw command for one frame.
///
/// Frames are drawn unscaled, centered in `viewport`. Pass a
/// `frame_count` to reject indices past the populated frames; without it
/// out-of-range indices are drawn as whatever lies at that grid position.
///
/// ## Example
///
/// ```rust
/// use sprite_view_core::{draw_command, classify, Offset, SheetDefinition, SpriteSpec, Viewport};
///
/// let spec = SpriteSpec::new(SheetDefinition::new(300, 300, "hero.png"));
/// let cmd = draw_command(&spec, classify(1024), 3, 8, Viewport::new(150.0, 120.0), None).unwrap();
///
/// assert_eq!(cmd.image, "hero.png");
/// assert_eq!((cmd.source.offset_x, cmd.source.offset_y), (200, 200));
/// assert_eq!(cmd.destination, Offset { x: 25, y: 10 });
/// ```
pub fn draw_command<H: Clone>(
    spec: &SpriteSpec<H>,
    category: ScreenCategory,
    frames_per_row: u32,
    frame_index: usize,
    viewport: Viewport,
    frame_count: Option<usize>,
) -> GeometryResult<DrawCommand<H>> {
    let sheet = spec.resolve(category);
    let source = match frame_count {
        Some(count) => compute_source_rect_checked(sheet, frames_per_row, frame_index, count)?,
        None => compute_source_rect(sheet, frames_per_row, frame_index)?,
    };
    let destination = compute_destination_offset(viewport.width, viewport.height, source.size());

    Ok(DrawCommand {
        image: sheet.image.clone(),
        source,
        destination,
        destination_size: source.size(),
    })
}

/// Inputs a cached draw command was computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct DrawKey {
    category: ScreenCategory,
    frame_index: usize,
    viewport: (u32, u32),
}

impl DrawKey {
    fn new(category: ScreenCategory, frame_index: usize, viewport: Viewport) -> Self {
        Self {
            category,
            frame_index,
            viewport: (viewport.width.to_bits(), viewport.height.to_bits()),
        }
    }
}

/// Single-entry memo of the last draw command.
#[derive(Clone, Debug)]
struct DrawCache<H> {
    entry: Option<(DrawKey, DrawCommand<H>)>,
    hits: u64,
    misses: u64,
}

impl<H> Default for DrawCache<H> {
    fn default() -> Self {
        Self {
            entry: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<H: Clone> DrawCache<H> {
    fn get(&mut self, key: &DrawKey) -> Option<DrawCommand<H>> {
        match &self.entry {
            Some((cached, command)) if cached == key => {
                self.hits += 1;
                Some(command.clone())
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    fn store(&mut self, key: DrawKey, command: DrawCommand<H>) {
        self.entry = Some((key, command));
    }

    fn clear(&mut self) {
        self.entry = None;
    }
}

/// A responsive sprite ready to be drawn from a render loop.
///
/// Call [`draw`](Self::draw) whenever the screen width, the frame index or
/// the viewport may have changed. The last command is memoized; a cached
/// command is always identical to a fresh computation.
///
/// ## Example
///
/// ```rust
/// use std::cell::Cell;
/// use sprite_view_core::{SheetDefinition, SpriteSpec, SpriteView};
///
/// let spec = SpriteSpec::new(SheetDefinition::new(600, 600, "walk@2x"))
///     .with_small(SheetDefinition::new(300, 300, "walk"));
/// let mut view = SpriteView::new(spec, 3);
///
/// let frame = Cell::new(0usize);
/// let phone_width: i32 = 320;
///
/// let cmd = view.draw_fitted(&phone_width, &frame).unwrap();
/// assert_eq!(cmd.image, "walk");
/// assert_eq!(cmd.source.width, 100);
///
/// frame.set(4);
/// let cmd = view.draw_fitted(&phone_width, &frame).unwrap();
/// assert_eq!((cmd.source.offset_x, cmd.source.offset_y), (100, 100));
/// ```
#[derive(Clone, Debug)]
pub struct SpriteView<H> {
    spec: SpriteSpec<H>,
    frames_per_row: u32,
    frame_count: Option<usize>,
    cache: Option<DrawCache<H>>,
}

impl<H: Clone> SpriteView<H> {
    /// Create a view over `spec` with memoization enabled.
    pub fn new(spec: SpriteSpec<H>, frames_per_row: u32) -> Self {
        Self {
            spec,
            frames_per_row,
            frame_count: None,
            cache: Some(DrawCache::default()),
        }
    }

    /// Reject frame indices at or past `frame_count`.
    pub fn with_frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = Some(frame_count);
        self.invalidate();
        self
    }

    /// Recompute on every draw.
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// The sheets this view chooses from.
    #[inline]
    pub fn spec(&self) -> &SpriteSpec<H> {
        &self.spec
    }

    /// Frames in each row of every sheet.
    #[inline]
    pub fn frames_per_row(&self) -> u32 {
        self.frames_per_row
    }

    /// Populated frame count, when indices are being checked.
    #[inline]
    pub fn frame_count(&self) -> Option<usize> {
        self.frame_count
    }

    /// Sheet that would be drawn at the current screen width.
    pub fn sheet<S: ScreenWidthProvider + ?Sized>(&self, screen: &S) -> &SheetDefinition<H> {
        self.spec.resolve_for_width(screen.screen_width())
    }

    /// Frame size at the current screen width.
    ///
    /// Hosts usually size their viewport to this.
    pub fn frame_size<S: ScreenWidthProvider + ?Sized>(
        &self,
        screen: &S,
    ) -> GeometryResult<FrameSize> {
        let rect = compute_source_rect(self.sheet(screen), self.frames_per_row, 0)?;
        Ok(rect.size())
    }

    /// Build the draw command for the cursor's current frame.
    pub fn draw<S, C>(
        &mut self,
        screen: &S,
        cursor: &C,
        viewport: Viewport,
    ) -> GeometryResult<DrawCommand<H>>
    where
        S: ScreenWidthProvider + ?Sized,
        C: AnimationCursor + ?Sized,
    {
        let category = classify(screen.screen_width());
        let frame_index = cursor.current_frame();
        let key = DrawKey::new(category, frame_index, viewport);

        if let Some(cache) = self.cache.as_mut() {
            if let Some(command) = cache.get(&key) {
                log::trace!("draw cache hit for frame {frame_index} ({category})");
                return Ok(command);
            }
        }

        log::trace!("computing draw command for frame {frame_index} ({category})");
        let command = draw_command(
            &self.spec,
            category,
            self.frames_per_row,
            frame_index,
            viewport,
            self.frame_count,
        )?;

        if let Some(cache) = self.cache.as_mut() {
            cache.store(key, command.clone());
        }
        Ok(command)
    }

    /// Draw into a viewport exactly the size of the frame.
    pub fn draw_fitted<S, C>(&mut self, screen: &S, cursor: &C) -> GeometryResult<DrawCommand<H>>
    where
        S: ScreenWidthProvider + ?Sized,
        C: AnimationCursor + ?Sized,
    {
        let width = screen.screen_width();
        let viewport = Viewport::fitting(self.frame_size(&width)?);
        self.draw(&width, cursor, viewport)
    }

    /// Drop the memoized command.
    pub fn invalidate(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    /// Cache hits and misses so far, if memoization is enabled.
    pub fn cache_stats(&self) -> Option<(u64, u64)> {
        self.cache.as_ref().map(|cache| (cache.hits, cache.misses))
    }
}
