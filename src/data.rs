//! Core data structures for sprite sheets and frame geometry.

use crate::screen::{classify, ScreenCategory};

/// One exported sprite sheet image.
///
/// `pixel_width` and `pixel_height` describe the whole sheet, not a single
/// frame. The image handle is owned by whatever loaded it; this crate only
/// hands it back to the renderer.
///
/// ```text
/// -------------
/// | 0 | 1 | 2 |
/// | 3 | 4 | 5 |
/// | 6 | 7 | 8 |
/// -------------
/// ```
///
/// The sheet above has 3 frames per row and 3 rows. Playback starts at
/// frame 0 in the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetDefinition<H> {
    /// Width of the whole sheet image in pixels
    pub pixel_width: u32,
    /// Height of the whole sheet image in pixels
    pub pixel_height: u32,
    /// Number of frame rows, when it differs from the frames per row
    pub rows: Option<u32>,
    /// Decoded image handle from the resource loader
    pub image: H,
}

impl<H> SheetDefinition<H> {
    /// Create a sheet with a square grid of frames.
    pub fn new(pixel_width: u32, pixel_height: u32, image: H) -> Self {
        Self {
            pixel_width,
            pixel_height,
            rows: None,
            image,
        }
    }

    /// Set an explicit row count for sheets that are not square grids.
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Number of frame rows in the sheet.
    ///
    /// Without an explicit count the grid is assumed square.
    #[inline]
    pub fn rows(&self, frames_per_row: u32) -> u32 {
        self.rows.unwrap_or(frames_per_row)
    }

    /// Size of a single frame. Returns `None` for an empty grid.
    pub fn frame_size(&self, frames_per_row: u32) -> Option<FrameSize> {
        let rows = self.rows(frames_per_row);
        if frames_per_row == 0 || rows == 0 {
            return None;
        }
        Some(FrameSize {
            width: self.pixel_width / frames_per_row,
            height: self.pixel_height / rows,
        })
    }

    /// Number of frame cells in the grid.
    #[inline]
    pub fn frame_capacity(&self, frames_per_row: u32) -> u64 {
        u64::from(frames_per_row) * u64::from(self.rows(frames_per_row))
    }
}

/// Responsive set of sprite sheets with a mandatory default.
///
/// The default is a constructor argument, so resolution always ends in a
/// concrete sheet.
///
/// ## Example
///
/// ```rust
/// use sprite_view_core::{ScreenCategory, SheetDefinition, SpriteSpec};
///
/// let spec = SpriteSpec::new(SheetDefinition::new(600, 600, "walk@2x"))
///     .with_small(SheetDefinition::new(300, 300, "walk@1x"));
///
/// assert_eq!(spec.resolve(ScreenCategory::Small).image, "walk@1x");
/// assert_eq!(spec.resolve(ScreenCategory::Large).image, "walk@2x");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSpec<H> {
    default: SheetDefinition<H>,
    small: Option<SheetDefinition<H>>,
    normal: Option<SheetDefinition<H>>,
    large: Option<SheetDefinition<H>>,
    tablet: Option<SheetDefinition<H>>,
}

impl<H> SpriteSpec<H> {
    /// Create a spec with only the default sheet.
    pub fn new(default: SheetDefinition<H>) -> Self {
        Self {
            default,
            small: None,
            normal: None,
            large: None,
            tablet: None,
        }
    }

    /// Set the sheet used for `category`.
    pub fn with_sheet(mut self, category: ScreenCategory, sheet: SheetDefinition<H>) -> Self {
        *self.slot_mut(category) = Some(sheet);
        self
    }

    /// Set the sheet for small screens.
    pub fn with_small(self, sheet: SheetDefinition<H>) -> Self {
        self.with_sheet(ScreenCategory::Small, sheet)
    }

    /// Set the sheet for normal screens.
    pub fn with_normal(self, sheet: SheetDefinition<H>) -> Self {
        self.with_sheet(ScreenCategory::Normal, sheet)
    }

    /// Set the sheet for large screens.
    pub fn with_large(self, sheet: SheetDefinition<H>) -> Self {
        self.with_sheet(ScreenCategory::Large, sheet)
    }

    /// Set the sheet for tablet screens.
    pub fn with_tablet(self, sheet: SheetDefinition<H>) -> Self {
        self.with_sheet(ScreenCategory::Tablet, sheet)
    }

    /// The fallback sheet.
    #[inline]
    pub fn default_sheet(&self) -> &SheetDefinition<H> {
        &self.default
    }

    /// The sheet registered for exactly `category`, if any.
    pub fn sheet(&self, category: ScreenCategory) -> Option<&SheetDefinition<H>> {
        match category {
            ScreenCategory::Small => self.small.as_ref(),
            ScreenCategory::Normal => self.normal.as_ref(),
            ScreenCategory::Large => self.large.as_ref(),
            ScreenCategory::Tablet => self.tablet.as_ref(),
        }
    }

    fn slot_mut(&mut self, category: ScreenCategory) -> &mut Option<SheetDefinition<H>> {
        match category {
            ScreenCategory::Small => &mut self.small,
            ScreenCategory::Normal => &mut self.normal,
            ScreenCategory::Large => &mut self.large,
            ScreenCategory::Tablet => &mut self.tablet,
        }
    }

    /// Pick the sheet to render for `category`.
    ///
    /// Only the slot matching `category` is considered; a missing slot
    /// falls back to the default, never to a neighbouring category.
    pub fn resolve(&self, category: ScreenCategory) -> &SheetDefinition<H> {
        match self.sheet(category) {
            Some(sheet) => sheet,
            None => {
                log::debug!("no {category} sheet, using default");
                &self.default
            }
        }
    }

    /// Classify `width` and resolve the sheet for it.
    #[inline]
    pub fn resolve_for_width(&self, width: i32) -> &SheetDefinition<H> {
        self.resolve(classify(width))
    }

    /// Categories that have a dedicated sheet, in priority order.
    pub fn categories(&self) -> impl Iterator<Item = ScreenCategory> + '_ {
        ScreenCategory::ALL
            .into_iter()
            .filter(|category| self.sheet(*category).is_some())
    }
}

/// Width and height of a frame in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    /// Create a size from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A rectangle in sheet pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameRect {
    pub offset_x: u32,
    pub offset_y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    /// Size of the rectangle.
    #[inline]
    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    /// Check whether the rectangle lies fully inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        u64::from(self.offset_x) + u64::from(self.width) <= u64::from(width)
            && u64::from(self.offset_y) + u64::from(self.height) <= u64::from(height)
    }
}

/// Placement of a frame inside the output viewport.
///
/// Negative when the viewport is smaller than the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

/// Output area the frame is drawn into, as measured by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport from the host's measured size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A viewport exactly the size of a frame.
    pub fn fitting(size: FrameSize) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}
